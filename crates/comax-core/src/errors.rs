//! Cross-cutting error types for Comax.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `IoError`) are defined in
//! their respective crates. They converge in `comax-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Comax crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (unknown culture code, empty key, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required foreign scoping key is absent from the session.
    #[error("Required scope missing: {0}")]
    ScopeMissing(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
