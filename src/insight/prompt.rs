//! Prompt builders for each insight kind.
//!
//! The opening line of each prompt doubles as the key the template responder
//! matches on, so keep the two in sync.

use crate::analytics::{CourseSummary, Stats};
use crate::types::StudentRecord;
use serde::{Deserialize, Serialize};

pub(crate) const CLASS_ANALYSIS_HEADER: &str = "Analyze this student class data:";
pub(crate) const INTERVENTION_HEADER: &str = "Student intervention request:";
pub(crate) const FEEDBACK_HEADER: &str = "Generate personalized feedback for:";
pub(crate) const PREDICTIVE_HEADER: &str = "Based on this academic data, provide predictive insights:";

/// The four insight reports the CLI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    ClassAnalysis,
    Intervention,
    Feedback,
    Predictive,
}

impl InsightKind {
    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::ClassAnalysis => "Class Analysis",
            InsightKind::Intervention => "Student Intervention",
            InsightKind::Feedback => "Personalized Feedback",
            InsightKind::Predictive => "Predictive Insights",
        }
    }
}

pub fn class_analysis_prompt(stats: &Stats) -> String {
    format!(
        "{}\nTotal Students: {}\nAverage GPA: {:.2}\nAt-Risk Students: {}\n\
         Provide insights on overall class performance, trends, and recommendations.",
        CLASS_ANALYSIS_HEADER, stats.total, stats.mean_gpa, stats.at_risk_count
    )
}

pub fn intervention_prompt(student: &StudentRecord) -> String {
    format!(
        "{}\nStudent: {}\nCourse: {}\nCurrent GPA: {}\n\
         Suggest specific intervention strategies and action items to help this student improve.",
        INTERVENTION_HEADER, student.name, student.course, student.gpa
    )
}

pub fn feedback_prompt(student: &StudentRecord) -> String {
    format!(
        "{}\nStudent: {}\nCourse: {}\nGPA: {}\n\
         Include strengths, areas for improvement, and encouragement.",
        FEEDBACK_HEADER, student.name, student.course, student.gpa
    )
}

pub fn predictive_prompt(courses: &[CourseSummary]) -> String {
    let mut prompt = format!("{}\n", PREDICTIVE_HEADER);
    for course in courses {
        prompt.push_str(&format!(
            "Course: {}, Avg GPA: {:.2}\n",
            course.course, course.mean_gpa
        ));
    }
    prompt.push_str("Predict trends, potential challenges, and provide proactive recommendations.");
    prompt
}
