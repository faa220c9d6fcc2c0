//! Resource store (libSQL) configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".comax/comax.db".to_string()
}

/// Default number of records fetched per store page.
const fn default_page_size() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Local libSQL database file. `":memory:"` for throwaway sessions.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://comax-prod.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Records per range-paginated select.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
            page_size: default_page_size(),
        }
    }
}

impl StoreConfig {
    /// Whether a remote database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
