//! Acting user and tenant scope.

use comax_core::identity::SessionContext;
use serde::{Deserialize, Serialize};

fn default_username() -> String {
    "comax".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Username recorded on audit entries.
    #[serde(default = "default_username")]
    pub username: String,

    /// Organization new records are scoped to. Empty = none selected.
    #[serde(default)]
    pub organization_id: String,

    /// Whether inserts must carry an organization.
    #[serde(default)]
    pub require_organization: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            organization_id: String::new(),
            require_organization: false,
        }
    }
}

impl SessionConfig {
    /// Build the explicit session context handed to the store.
    pub fn to_context(&self) -> SessionContext {
        SessionContext {
            username: self.username.clone(),
            organization_id: (!self.organization_id.is_empty())
                .then(|| self.organization_id.clone()),
            require_organization: self.require_organization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_organization_maps_to_none() {
        let context = SessionConfig::default().to_context();
        assert_eq!(context.username, "comax");
        assert_eq!(context.organization_id, None);
        assert!(!context.require_organization);
    }

    #[test]
    fn organization_is_carried_into_context() {
        let config = SessionConfig {
            organization_id: "org-7".into(),
            require_organization: true,
            ..Default::default()
        };
        let context = config.to_context();
        assert_eq!(context.organization_id.as_deref(), Some("org-7"));
        assert!(context.require_organization);
    }
}
