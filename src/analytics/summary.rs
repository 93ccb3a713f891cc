//! Dashboard summary over a record snapshot.

use crate::types::StudentRecord;
use serde::{Deserialize, Serialize};

/// Name reported as top student when there are no records.
pub const NO_TOP_STUDENT: &str = "N/A";

/// Summary statistics for a set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    /// Arithmetic mean, rounded to 2 decimals.
    pub mean_gpa: f64,
    pub top_student_name: String,
    /// `None` only for an empty snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_gpa: Option<f64>,
    pub at_risk_count: usize,
}

impl Stats {
    fn empty() -> Self {
        Self {
            total: 0,
            mean_gpa: 0.0,
            top_student_name: NO_TOP_STUDENT.to_string(),
            max_gpa: None,
            at_risk_count: 0,
        }
    }
}

/// Summarize `records`. The top student is the first record, in input order,
/// holding the maximum GPA.
pub fn summarize(records: &[StudentRecord]) -> Stats {
    let Some(first) = records.first() else {
        return Stats::empty();
    };

    let mut top = first;
    let mut sum = 0.0;
    let mut at_risk_count = 0;
    for record in records {
        sum += record.gpa;
        if record.gpa > top.gpa {
            top = record;
        }
        if record.is_at_risk() {
            at_risk_count += 1;
        }
    }

    Stats {
        total: records.len(),
        mean_gpa: round2(sum / records.len() as f64),
        top_student_name: top.name.clone(),
        max_gpa: Some(top.gpa),
        at_risk_count,
    }
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
