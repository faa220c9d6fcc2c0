//! Shared test utilities for comax-db unit tests.

use comax_core::identity::SessionContext;

use crate::ComaxDb;
use crate::service::ComaxService;

/// In-memory service acting as user `editor` with no organization scoping.
pub async fn test_service() -> ComaxService {
    test_service_with_session(SessionContext::new("editor")).await
}

/// In-memory service for a specific session.
pub async fn test_service_with_session(session: SessionContext) -> ComaxService {
    let db = ComaxDb::open_local(":memory:").await.unwrap();
    ComaxService::from_db(db, session)
}
