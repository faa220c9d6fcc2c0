//! Translation grid display settings.

use comax_core::enums::CultureCode;
use serde::{Deserialize, Serialize};

const fn default_page_size() -> usize {
    50
}

const fn default_load_delay_ms() -> u64 {
    300
}

fn default_cultures() -> Vec<CultureCode> {
    vec![
        CultureCode::HeIl,
        CultureCode::EnUs,
        CultureCode::RoRo,
        CultureCode::ThTh,
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GridConfig {
    /// Rows revealed initially and per additional page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Delay before a requested page is revealed.
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,

    /// Culture columns shown in the grid and written by CSV export.
    #[serde(default = "default_cultures")]
    pub cultures: Vec<CultureCode>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            load_delay_ms: default_load_delay_ms(),
            cultures: default_cultures(),
        }
    }
}
