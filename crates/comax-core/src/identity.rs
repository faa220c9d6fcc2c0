use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Explicit session context threaded through every store call.
///
/// Carries who is acting (recorded on audit entries) and which organization
/// new records are scoped to. Produced once at startup from configuration and
/// handed to `comax-db`; nothing reads session state from ambient globals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionContext {
    /// Username written to `audit_logs.username`.
    pub username: String,
    /// Organization the session acts for. `None` = unscoped.
    pub organization_id: Option<String>,
    /// Whether the deployment requires every insert to carry an organization.
    pub require_organization: bool,
}

impl SessionContext {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            organization_id: None,
            require_organization: false,
        }
    }

    #[must_use]
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    #[must_use]
    pub const fn requiring_organization(mut self) -> Self {
        self.require_organization = true;
        self
    }

    /// Organization to stamp on a new record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ScopeMissing` when the deployment requires an
    /// organization and the session has none.
    pub fn insert_scope(&self) -> Result<Option<&str>, CoreError> {
        match (self.organization_id.as_deref(), self.require_organization) {
            (Some(org), _) => Ok(Some(org)),
            (None, false) => Ok(None),
            (None, true) => Err(CoreError::ScopeMissing(
                "organization_id is required for inserts but no organization is selected".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscoped_session_inserts_without_organization() {
        let session = SessionContext::new("editor");
        assert_eq!(session.insert_scope().unwrap(), None);
    }

    #[test]
    fn scoped_session_stamps_organization() {
        let session = SessionContext::new("editor")
            .with_organization("org-1")
            .requiring_organization();
        assert_eq!(session.insert_scope().unwrap(), Some("org-1"));
    }

    #[test]
    fn required_scope_missing_fails_fast() {
        let session = SessionContext::new("editor").requiring_organization();
        let err = session.insert_scope().unwrap_err();
        assert!(matches!(err, CoreError::ScopeMissing(_)));
    }
}
