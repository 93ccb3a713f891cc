//! Format records, analytics and insights as text or JSON.

use crate::analytics::{ClassStatistics, CourseStatus, CourseSummary, Stats};
use crate::error::ApiError;
use crate::insight::InsightKind;
use crate::types::{StudentRecord, AT_RISK_GPA_THRESHOLD};
use comfy_table::presets::{UTF8_BORDERS_ONLY, UTF8_FULL};
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::OutputError(e.to_string()))
}

/// Render records as a table in the given order.
pub fn format_records_table(records: &[StudentRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Age", "Course", "GPA"]);
    for r in records {
        table.add_row(vec![
            r.id.clone(),
            r.name.clone(),
            r.age.to_string(),
            r.course.clone(),
            format!("{:.2}", r.gpa),
        ]);
    }
    table.to_string()
}

pub fn format_record_list_text(records: &[StudentRecord]) -> String {
    if records.is_empty() {
        return "No student records found!".to_string();
    }
    format!(
        "{}\n\n{}\n\nTotal Students: {}",
        format_section_heading("All Student Records"),
        format_records_table(records),
        records.len()
    )
}

pub fn format_dashboard_text(stats: &Stats) -> String {
    if stats.total == 0 {
        return "No student data available. Add students first!".to_string();
    }
    let mut out = format!("{}\n\n", format_section_heading("Key Metrics"));
    out.push_str(&format!("  Total Students    : {}\n", stats.total));
    out.push_str(&format!("  Average GPA       : {:.2}\n", stats.mean_gpa));
    match stats.max_gpa {
        Some(max) => out.push_str(&format!(
            "  Top Performer     : {} (GPA: {:.2})\n",
            stats.top_student_name, max
        )),
        None => out.push_str(&format!(
            "  Top Performer     : {}\n",
            stats.top_student_name
        )),
    }
    out.push_str(&format!("  At-Risk Students  : {}", stats.at_risk_count));
    out
}

pub fn format_top_performers_text(top: &[StudentRecord]) -> String {
    if top.is_empty() {
        return "No student records available!".to_string();
    }
    format!(
        "{}\n\n{}\n\nTop {} students displayed.",
        format_section_heading("Top Performers"),
        format_records_table(top),
        top.len()
    )
}

pub fn format_at_risk_text(total: usize, at_risk: &[StudentRecord]) -> String {
    if total == 0 {
        return "No student records available!".to_string();
    }
    let heading = format_section_heading(&format!(
        "At-Risk Students (GPA < {:.1})",
        AT_RISK_GPA_THRESHOLD
    ));
    if at_risk.is_empty() {
        return format!(
            "{}\n\nNo at-risk students found! All students are performing well.",
            heading
        );
    }
    format!(
        "{}\n\n{}\n\n{} students need attention.",
        heading,
        format_records_table(at_risk),
        at_risk.len().yellow()
    )
}

pub fn format_class_statistics_text(stats: Option<&ClassStatistics>) -> String {
    let Some(stats) = stats else {
        return "No student records available!".to_string();
    };
    let mut out = format!("{}\n\n", format_section_heading("Class Statistics"));
    out.push_str(&format!("  Total Students   : {}\n", stats.total));
    out.push_str(&format!("  Average GPA      : {:.2}\n", stats.mean_gpa));
    out.push_str(&format!("  Median GPA       : {:.2}\n", stats.median_gpa));
    out.push_str(&format!("  Highest GPA      : {:.2}\n", stats.max_gpa));
    out.push_str(&format!("  Lowest GPA       : {:.2}\n\n", stats.min_gpa));

    let dist = &stats.distribution;
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Band", "Range", "Students"]);
    for (band, range, count) in [
        ("Excellent", ">= 8.0", dist.excellent),
        ("Good", "6.5 - 7.9", dist.good),
        ("Average", "5.0 - 6.4", dist.average),
        ("Poor", "< 5.0", dist.poor),
    ] {
        table.add_row(vec![band.to_string(), range.to_string(), count.to_string()]);
    }
    out.push_str(&format!("{}\n\n{}", format_section_heading("GPA Distribution"), table));
    out
}

fn colored_status(status: CourseStatus) -> String {
    let label = status.label();
    match status {
        CourseStatus::Excellent => label.green().to_string(),
        CourseStatus::Good => label.blue().to_string(),
        CourseStatus::Average => label.yellow().to_string(),
        CourseStatus::NeedsAttention => label.red().to_string(),
    }
}

pub fn format_course_breakdown_text(courses: &[CourseSummary]) -> String {
    if courses.is_empty() {
        return "No student records available!".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Course", "Students", "Avg GPA", "Status"]);
    for c in courses {
        table.add_row(vec![
            c.course.clone(),
            c.students.to_string(),
            format!("{:.2}", c.mean_gpa),
            colored_status(c.status),
        ]);
    }
    format!(
        "{}\n\n{}",
        format_section_heading("Course-Wise Analysis"),
        table
    )
}

pub fn format_insight_text(kind: InsightKind, text: &str) -> String {
    let rule = "-".repeat(70);
    format!(
        "{}\n{}\n{}\n{}",
        format_section_heading(kind.title()),
        rule,
        text.trim_end(),
        rule
    )
}
