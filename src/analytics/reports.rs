//! Class, course and ranking reports.

use crate::analytics::summary::round2;
use crate::types::StudentRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const EXCELLENT_GPA: f64 = 8.0;
pub const GOOD_GPA: f64 = 6.5;
pub const AVERAGE_GPA: f64 = 5.0;

/// Student counts per GPA band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpaDistribution {
    /// `>= 8.0`
    pub excellent: usize,
    /// `6.5 ..< 8.0`
    pub good: usize,
    /// `5.0 ..< 6.5`
    pub average: usize,
    /// `< 5.0`
    pub poor: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStatistics {
    pub total: usize,
    pub mean_gpa: f64,
    pub median_gpa: f64,
    pub min_gpa: f64,
    pub max_gpa: f64,
    pub distribution: GpaDistribution,
}

/// Full class statistics, or `None` when there are no records.
pub fn class_statistics(records: &[StudentRecord]) -> Option<ClassStatistics> {
    if records.is_empty() {
        return None;
    }

    let mut gpas: Vec<f64> = records.iter().map(|r| r.gpa).collect();
    gpas.sort_by(f64::total_cmp);

    let n = gpas.len();
    let median = if n % 2 == 0 {
        (gpas[n / 2 - 1] + gpas[n / 2]) / 2.0
    } else {
        gpas[n / 2]
    };

    let mut distribution = GpaDistribution::default();
    for &gpa in &gpas {
        if gpa >= EXCELLENT_GPA {
            distribution.excellent += 1;
        } else if gpa >= GOOD_GPA {
            distribution.good += 1;
        } else if gpa >= AVERAGE_GPA {
            distribution.average += 1;
        } else {
            distribution.poor += 1;
        }
    }

    Some(ClassStatistics {
        total: n,
        mean_gpa: round2(gpas.iter().sum::<f64>() / n as f64),
        median_gpa: round2(median),
        min_gpa: gpas[0],
        max_gpa: gpas[n - 1],
        distribution,
    })
}

/// Performance band of a course average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    Excellent,
    Good,
    Average,
    NeedsAttention,
}

impl CourseStatus {
    pub fn from_average(avg: f64) -> Self {
        if avg >= 7.5 {
            CourseStatus::Excellent
        } else if avg >= 6.0 {
            CourseStatus::Good
        } else if avg >= 5.0 {
            CourseStatus::Average
        } else {
            CourseStatus::NeedsAttention
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseStatus::Excellent => "Excellent",
            CourseStatus::Good => "Good",
            CourseStatus::Average => "Average",
            CourseStatus::NeedsAttention => "Needs Attention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course: String,
    pub students: usize,
    pub mean_gpa: f64,
    pub status: CourseStatus,
}

/// Per-course breakdown, sorted by course name.
pub fn course_breakdown(records: &[StudentRecord]) -> Vec<CourseSummary> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.course.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.gpa;
    }

    groups
        .into_iter()
        .map(|(course, (students, sum))| {
            let avg = sum / students as f64;
            CourseSummary {
                course: course.to_string(),
                students,
                mean_gpa: round2(avg),
                status: CourseStatus::from_average(avg),
            }
        })
        .collect()
}

/// Highest GPAs first; ties keep input order.
pub fn top_performers(records: &[StudentRecord], n: usize) -> Vec<StudentRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.gpa.total_cmp(&a.gpa));
    sorted.truncate(n);
    sorted
}

/// At-risk records in input order.
pub fn at_risk(records: &[StudentRecord]) -> Vec<StudentRecord> {
    records.iter().filter(|r| r.is_at_risk()).cloned().collect()
}
