//! Service layer: the store handle plus the session acting on it.
//!
//! `ComaxService` wraps `ComaxDb` and an explicit [`SessionContext`]. All repo
//! methods are implemented as `impl ComaxService` blocks, so every write knows
//! who is acting (for audit) and which organization scopes new records.

use comax_core::identity::SessionContext;

use crate::ComaxDb;
use crate::error::DatabaseError;

/// Default number of records per store page.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

pub struct ComaxService {
    db: ComaxDb,
    session: SessionContext,
    page_size: u32,
}

impl ComaxService {
    /// Open a local database file (or `":memory:"`) for `session`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, session: SessionContext) -> Result<Self, DatabaseError> {
        let db = ComaxDb::open_local(db_path).await?;
        Ok(Self::from_db(db, session))
    }

    /// Connect to a remote libSQL database for `session`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established.
    pub async fn new_remote(
        url: &str,
        auth_token: &str,
        session: SessionContext,
    ) -> Result<Self, DatabaseError> {
        let db = ComaxDb::open_remote(url, auth_token).await?;
        Ok(Self::from_db(db, session))
    }

    /// Wrap an existing `ComaxDb`.
    #[must_use]
    pub const fn from_db(db: ComaxDb, session: SessionContext) -> Self {
        Self {
            db,
            session,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the store page size used by full fetches. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub const fn db(&self) -> &ComaxDb {
        &self.db
    }

    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Organization to stamp on a new record, per the session's scoping rule.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ScopeMissing` if an organization is required but absent.
    pub fn insert_scope(&self) -> Result<Option<&str>, DatabaseError> {
        Ok(self.session.insert_scope()?)
    }
}
