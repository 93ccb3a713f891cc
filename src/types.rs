//! Core types for the student roster.

use serde::{Deserialize, Serialize};

/// StudentId: caller-supplied opaque token, unique within a store.
pub type StudentId = String;

/// GPA below which a student is considered at risk.
pub const AT_RISK_GPA_THRESHOLD: f64 = 5.0;

/// A single student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    pub course: String,
    pub gpa: f64,
}

impl StudentRecord {
    pub fn new(
        id: impl Into<StudentId>,
        name: impl Into<String>,
        age: u32,
        course: impl Into<String>,
        gpa: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            course: course.into(),
            gpa,
        }
    }

    pub fn is_at_risk(&self) -> bool {
        self.gpa < AT_RISK_GPA_THRESHOLD
    }

    /// Overwrite the fields supplied in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(name) = patch.name.as_deref().filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(course) = patch.course.as_deref().filter(|c| !c.is_empty()) {
            self.course = course.to_string();
        }
        if let Some(gpa) = patch.gpa {
            self.gpa = gpa;
        }
    }
}

/// Partial update for a record. `None` and empty strings mean "keep".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub course: Option<String>,
    pub gpa: Option<f64>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.age.is_none()
            && self.course.as_deref().map_or(true, str::is_empty)
            && self.gpa.is_none()
    }

    pub fn with_gpa(gpa: f64) -> Self {
        Self {
            gpa: Some(gpa),
            ..Self::default()
        }
    }
}
