//! Line-oriented data file encoding.
//!
//! Layout:
//!
//! ```text
//! 1001            <- legacy counter, carried through unchanged
//! S1              <- id
//! Ann             <- name
//! 20              <- age
//! CS              <- course
//! 8.2             <- gpa
//! ...             <- one 5-line block per record, insertion order
//! ```
//!
//! Values are written without escaping, so a line break inside a field would
//! shift every following block. The encoder refuses such values and the
//! decoder refuses anything that does not split into whole blocks.

use crate::error::StoreError;
use crate::types::StudentRecord;
use std::collections::HashSet;

/// Counter value written to a fresh data file.
pub const DEFAULT_NEXT_ID: u64 = 1001;

/// Lines per encoded record.
pub const LINES_PER_RECORD: usize = 5;

/// Decoded contents of a data file.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterFile {
    /// Legacy auto-increment counter. Preserved verbatim, never advanced.
    pub next_id: u64,
    pub records: Vec<StudentRecord>,
}

impl Default for RosterFile {
    fn default() -> Self {
        Self {
            next_id: DEFAULT_NEXT_ID,
            records: Vec::new(),
        }
    }
}

/// Encode a roster into its on-disk text form.
pub fn encode(file: &RosterFile) -> Result<String, StoreError> {
    let mut out = String::with_capacity(16 + file.records.len() * 48);
    out.push_str(&file.next_id.to_string());
    out.push('\n');
    for record in &file.records {
        check_encodable(record)?;
        out.push_str(&record.id);
        out.push('\n');
        out.push_str(&record.name);
        out.push('\n');
        out.push_str(&record.age.to_string());
        out.push('\n');
        out.push_str(&record.course);
        out.push('\n');
        // f64 Display is the shortest string that parses back to the same value.
        out.push_str(&record.gpa.to_string());
        out.push('\n');
    }
    Ok(out)
}

fn check_encodable(record: &StudentRecord) -> Result<(), StoreError> {
    let unencodable = |field: &'static str, reason: &'static str| StoreError::Unencodable {
        id: record.id.clone(),
        field,
        reason,
    };
    if record.id.is_empty() {
        return Err(unencodable("id", "value is empty"));
    }
    for (field, value) in [
        ("id", record.id.as_str()),
        ("name", record.name.as_str()),
        ("course", record.course.as_str()),
    ] {
        if value.contains(['\n', '\r']) {
            return Err(unencodable(field, "value contains a line break"));
        }
    }
    if !record.gpa.is_finite() {
        return Err(unencodable("gpa", "value is not a finite number"));
    }
    Ok(())
}

/// Decode the on-disk text form. An empty input decodes to an empty roster.
pub fn decode(input: &str) -> Result<RosterFile, StoreError> {
    if input.is_empty() {
        return Ok(RosterFile::default());
    }

    let body = input.strip_suffix('\n').unwrap_or(input);
    // CRLF files (written by Windows tools) decode the same as LF files.
    let lines: Vec<&str> = body
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let next_id = lines[0]
        .trim()
        .parse::<u64>()
        .map_err(|e| StoreError::decode(1, format!("invalid counter '{}': {}", lines[0], e)))?;

    let fields = &lines[1..];
    let remainder = fields.len() % LINES_PER_RECORD;
    if remainder != 0 {
        let start = fields.len() - remainder + 2;
        return Err(StoreError::decode(
            start,
            format!(
                "incomplete record: expected {} lines, found {}",
                LINES_PER_RECORD, remainder
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(fields.len() / LINES_PER_RECORD);
    for (index, block) in fields.chunks(LINES_PER_RECORD).enumerate() {
        // Line number of the block's id line (counter is line 1).
        let line = index * LINES_PER_RECORD + 2;
        let record = decode_block(block, line)?;
        if !seen.insert(record.id.clone()) {
            return Err(StoreError::decode(
                line,
                format!("duplicate id '{}'", record.id),
            ));
        }
        records.push(record);
    }

    Ok(RosterFile { next_id, records })
}

fn decode_block(block: &[&str], line: usize) -> Result<StudentRecord, StoreError> {
    let id = block[0];
    if id.is_empty() {
        return Err(StoreError::decode(line, "empty id"));
    }
    for (offset, label) in [(0, "id"), (1, "name"), (3, "course")] {
        if block[offset].contains('\r') {
            return Err(StoreError::decode(
                line + offset,
                format!("{} contains a carriage return", label),
            ));
        }
    }
    let age = block[2].trim().parse::<u32>().map_err(|e| {
        StoreError::decode(line + 2, format!("invalid age '{}': {}", block[2], e))
    })?;
    let gpa = block[4].trim().parse::<f64>().map_err(|e| {
        StoreError::decode(line + 4, format!("invalid gpa '{}': {}", block[4], e))
    })?;
    if !gpa.is_finite() {
        return Err(StoreError::decode(
            line + 4,
            format!("gpa '{}' is not a finite number", block[4]),
        ));
    }
    Ok(StudentRecord {
        id: id.to_string(),
        name: block[1].to_string(),
        age,
        course: block[3].to_string(),
        gpa,
    })
}
