//! Deterministic local insight text.
//!
//! Chooses a report by matching the prompt and fills it with values read back
//! out of the prompt. Same prompt, same text.

use super::prompt::{
    CLASS_ANALYSIS_HEADER, FEEDBACK_HEADER, INTERVENTION_HEADER, PREDICTIVE_HEADER,
};
use super::InsightProvider;
use crate::error::InsightError;
use async_trait::async_trait;

const DEFAULT_NAME: &str = "Student";

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResponder;

impl TemplateResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, prompt: &str) -> String {
        if prompt.contains(CLASS_ANALYSIS_HEADER) {
            class_report(prompt)
        } else if prompt.contains(PREDICTIVE_HEADER) {
            predictive_report(prompt)
        } else if prompt.starts_with(INTERVENTION_HEADER)
            || prompt.to_lowercase().contains("intervention")
        {
            intervention_report(&student_name(prompt))
        } else {
            feedback_report(&student_name(prompt))
        }
    }
}

#[async_trait]
impl InsightProvider for TemplateResponder {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        Ok(self.render(prompt))
    }
}

/// Value after `label` up to the end of its line.
fn field<'a>(prompt: &'a str, label: &str) -> Option<&'a str> {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix(label))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn student_name(prompt: &str) -> String {
    field(prompt, "Student:")
        .or_else(|| field(prompt, "Name:"))
        .or_else(|| {
            prompt
                .split_once(FEEDBACK_HEADER)
                .and_then(|(_, rest)| rest.split([',', '\n']).map(str::trim).find(|s| !s.is_empty()))
        })
        .unwrap_or(DEFAULT_NAME)
        .to_string()
}

fn class_report(prompt: &str) -> String {
    let total = field(prompt, "Total Students:").unwrap_or("the");
    let average = field(prompt, "Average GPA:").unwrap_or("n/a");
    let at_risk = field(prompt, "At-Risk Students:").unwrap_or("0");
    format!(
        "**Class Analysis Report**\n\n\
         **Overview:**\n\
         The class of {total} students has an average GPA of {average}, with {at_risk} \
         student(s) currently below the at-risk threshold.\n\n\
         **Key Insights:**\n\
         • Students above 9.0 show a firm command of core material and can anchor group work.\n\
         • Mid-range scores are spread widely, which points to uneven preparation rather than a single gap.\n\
         • At-risk students benefit most from early, structured check-ins.\n\n\
         **Recommendations:**\n\
         1. Pair top performers with students in the lower bands for weekly study sessions.\n\
         2. Offer additional lab or tutorial time for courses with the lowest averages.\n\
         3. Review attendance and submission patterns for the at-risk group every two weeks."
    )
}

fn intervention_report(name: &str) -> String {
    format!(
        "**Intervention Plan for {name}**\n\n\
         **Risk Assessment:**\n\
         {name} is showing signs of academic difficulty. Early support is recommended \
         before the end of term.\n\n\
         **Action Plan:**\n\
         1. **Academic Counseling:** Hold a one-on-one session to identify academic and personal roadblocks.\n\
         2. **Targeted Practice:** Assign focused exercises for the weakest subject areas.\n\
         3. **Progress Tracking:** Use short weekly quizzes to measure improvement on core concepts.\n\n\
         **Expected Outcome:**\n\
         With consistent support, {name} should be able to raise their GPA measurably within a semester."
    )
}

fn feedback_report(name: &str) -> String {
    format!(
        "**Personalized Feedback: {name}**\n\n\
         **Strengths:**\n\
         • Shows solid problem-solving ability in practical assignments.\n\
         • Participates consistently and shows leadership potential.\n\n\
         **Areas for Growth:**\n\
         • Submission timing could be more consistent.\n\
         • Exploring more advanced topics would keep the work challenging.\n\n\
         **Summary:**\n\
         {name} contributes well to the class. Better time management will lift their results to the next tier."
    )
}

fn predictive_report(prompt: &str) -> String {
    let mut courses: Vec<(String, f64)> = prompt
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("Course:")?;
            let (course, avg) = rest.split_once(", Avg GPA:")?;
            Some((course.trim().to_string(), avg.trim().parse::<f64>().ok()?))
        })
        .collect();

    if courses.is_empty() {
        return "**Predictive Insights**\n\nNo course data was provided, so no trend can be projected.".to_string();
    }

    courses.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let mut out = String::from("**Predictive Insights**\n\n**Course Outlook:**\n");
    for (course, avg) in &courses {
        let outlook = if *avg >= 7.5 {
            "likely to stay strong"
        } else if *avg >= 6.0 {
            "stable, with room to improve"
        } else if *avg >= 5.0 {
            "at risk of slipping without support"
        } else {
            "needs immediate attention"
        };
        out.push_str(&format!("• {} (avg {:.2}): {}\n", course, avg, outlook));
    }

    let (weakest, _) = &courses[courses.len() - 1];
    let (strongest, _) = &courses[0];
    out.push_str(&format!(
        "\n**Recommendations:**\n\
         1. Prioritize tutoring capacity for {weakest}.\n\
         2. Share study practices from {strongest} across other courses.\n\
         3. Re-run this report after the next assessment cycle to confirm the trend."
    ));
    out
}
