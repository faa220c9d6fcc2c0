//! Database error types for comax-db.

use comax_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Lookup by id found nothing.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Input rejected before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The deployment requires an organization and the session has none.
    #[error("Required scope missing: {0}")]
    ScopeMissing(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ScopeMissing(msg) => Self::ScopeMissing(msg),
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
