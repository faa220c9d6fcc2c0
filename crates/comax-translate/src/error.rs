//! Machine-translation error types.

use comax_core::enums::CultureCode;
use comax_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("text is empty")]
    EmptyText,

    /// HTTP succeeded but the payload reports a failure or carries no text.
    #[error("translation rejected (status {status}): {message}")]
    Rejected { status: i64, message: String },

    #[error("cannot translate {0} into itself")]
    SameCulture(CultureCode),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
