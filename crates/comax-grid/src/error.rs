//! Grid error types.

use comax_core::enums::CultureCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A save for this cell is still outstanding.
    #[error("edit already in flight for {resource_key} ({culture})")]
    EditInFlight {
        resource_key: String,
        culture: CultureCode,
    },

    /// No row with this resource key is loaded.
    #[error("no row loaded for resource key '{0}'")]
    UnknownRow(String),

    /// A sort column name did not parse.
    #[error("unknown sort column '{0}' (expected 'key' or a culture code)")]
    UnknownColumn(String),
}
