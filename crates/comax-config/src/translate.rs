//! Machine-translation provider configuration.

use comax_core::enums::CultureCode;
use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://api.mymemory.translated.net".to_string()
}

const fn default_source_culture() -> CultureCode {
    CultureCode::HeIl
}

/// Pause between provider calls, to stay under the free-tier rate limit.
const fn default_delay_ms() -> u64 {
    100
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslateConfig {
    /// Base URL of the MyMemory-compatible API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Culture every translation starts from.
    #[serde(default = "default_source_culture")]
    pub source_culture: CultureCode,

    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Contact e-mail sent as `de=`; raises the provider's daily quota.
    #[serde(default)]
    pub contact_email: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            source_culture: default_source_culture(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
            contact_email: String::new(),
        }
    }
}
