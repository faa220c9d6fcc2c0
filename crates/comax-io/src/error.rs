//! I/O and validation errors for import and export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// A record failed validation. `row` is 1-based in file order.
    #[error("row {row}: {field}: {reason}")]
    Validation {
        row: usize,
        field: &'static str,
        reason: String,
    },

    /// The top-level JSON value is not an object or array of objects.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("unsupported file format '{0}' (expected .json, .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    pub(crate) fn validation(row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            row,
            field,
            reason: reason.into(),
        }
    }
}
