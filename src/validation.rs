//! Caller-side domain validation for student input.
//!
//! The store accepts any encodable record; range and shape checks live here and
//! are applied by the CLI before a record reaches the store.

use crate::error::ValidationError;
use crate::types::{RecordPatch, StudentRecord};

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 100;
pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 10.0;

/// IDs are ASCII alphanumeric with at least one letter and one digit.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    let mut has_alpha = false;
    let mut has_digit = false;
    for c in id.chars() {
        if !c.is_ascii_alphanumeric() {
            return Err(ValidationError::InvalidId(id.to_string()));
        }
        has_alpha |= c.is_ascii_alphabetic();
        has_digit |= c.is_ascii_digit();
    }
    if has_alpha && has_digit {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

pub fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::LineBreak(field));
    }
    Ok(())
}

pub fn validate_age(age: i64) -> Result<u32, ValidationError> {
    if (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&age) {
        Ok(age as u32)
    } else {
        Err(ValidationError::AgeOutOfRange(age))
    }
}

pub fn validate_gpa(gpa: f64) -> Result<f64, ValidationError> {
    if gpa.is_finite() && (MIN_GPA..=MAX_GPA).contains(&gpa) {
        Ok(gpa)
    } else {
        Err(ValidationError::GpaOutOfRange(gpa))
    }
}

/// Validate every field of a new record.
pub fn validate_record(record: &StudentRecord) -> Result<(), ValidationError> {
    validate_id(&record.id)?;
    validate_text("Name", &record.name)?;
    validate_age(i64::from(record.age))?;
    validate_text("Course", &record.course)?;
    validate_gpa(record.gpa)?;
    Ok(())
}

/// Validate the supplied fields of a patch. Empty text fields mean "keep" and pass.
pub fn validate_patch(patch: &RecordPatch) -> Result<(), ValidationError> {
    if let Some(name) = patch.name.as_deref().filter(|n| !n.is_empty()) {
        validate_text("Name", name)?;
    }
    if let Some(age) = patch.age {
        validate_age(i64::from(age))?;
    }
    if let Some(course) = patch.course.as_deref().filter(|c| !c.is_empty()) {
        validate_text("Course", course)?;
    }
    if let Some(gpa) = patch.gpa {
        validate_gpa(gpa)?;
    }
    Ok(())
}
