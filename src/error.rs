//! Error types for the roster store, validation layer and application boundary.

use thiserror::Error;

/// Errors raised by record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `add` was called with an id that is already stored.
    #[error("Student ID '{0}' already exists")]
    DuplicateId(String),

    /// `update`, `delete` or a lookup referenced an id that is not stored.
    #[error("Student with ID '{0}' not found")]
    NotFound(String),

    /// The persisted file is malformed. `line` is 1-based.
    #[error("Malformed data file at line {line}: {reason}")]
    Decode { line: usize, reason: String },

    /// A field value cannot be represented in the line-oriented encoding.
    #[error("Field '{field}' of record '{id}' cannot be stored: {reason}")]
    Unencodable {
        id: String,
        field: &'static str,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn decode(line: usize, reason: impl Into<String>) -> Self {
        StoreError::Decode {
            line,
            reason: reason.into(),
        }
    }
}

/// A caller-side domain check that rejected user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("ID must be alphanumeric and include at least one letter and one digit (got '{0}')")]
    InvalidId(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{0} cannot contain line breaks")]
    LineBreak(&'static str),

    #[error("Age must be between 1 and 100 (got {0})")]
    AgeOutOfRange(i64),

    #[error("GPA must be between 0.0 and 10.0 (got {0})")]
    GpaOutOfRange(f64),

    #[error("Count must be a positive number")]
    NonPositiveCount,
}

/// Failure of a remote insight request. Never reaches CLI users; the insight
/// service answers these with the local template instead.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("No API key configured (set GEMINI_API_KEY or insight.api_key)")]
    MissingCredential,

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Endpoint returned no text")]
    EmptyResponse,
}

/// Application-level error surfaced by the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    StorageError(#[from] StoreError),

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Failed to render output: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
