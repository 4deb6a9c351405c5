//! Error types for calgen.

use thiserror::Error;

/// Errors that can occur while turning an offset list into a calendar.
#[derive(Error, Debug)]
pub enum CalgenError {
    #[error("Unable to determine non-empty sample from input file to deduce CSV dialect.")]
    EmptySample,

    #[error("Could not parse row '{row}' from input file: expected 3 fields, got {fields}")]
    MalformedRow { row: String, fields: usize },

    #[error("Invalid day offset '{value}' in row '{row}'")]
    InvalidOffset { value: String, row: String },

    #[error("No entries to resolve the event date against")]
    NoEntries,

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for calgen operations.
pub type CalgenResult<T> = Result<T, CalgenError>;
