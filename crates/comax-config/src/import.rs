//! Import validation settings.

use comax_core::enums::CultureCode;
use serde::{Deserialize, Serialize};

fn default_allowed_cultures() -> Vec<CultureCode> {
    vec![CultureCode::HeIl, CultureCode::EnUs, CultureCode::RoRo]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Cultures an import file may contain.
    #[serde(default = "default_allowed_cultures")]
    pub allowed_cultures: Vec<CultureCode>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            allowed_cultures: default_allowed_cultures(),
        }
    }
}
