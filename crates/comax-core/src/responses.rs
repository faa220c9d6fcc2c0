//! Result types returned by batch operations and printed by `comax` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of one import batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported_count: u32,
    pub added_count: u32,
    pub updated_count: u32,
    pub error_count: u32,
    /// Human-readable message per failed record, in batch order.
    pub errors: Vec<String>,
}

/// How a single cell edit reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Inserted,
    Updated,
}

/// Outcome of syncing an application's fields into the resource store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncSummary {
    pub synced: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

/// Outcome of a machine-translation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranslationRunSummary {
    pub translated: u32,
    pub skipped: u32,
    pub errors: u32,
    pub error_messages: Vec<String>,
}

impl TranslationRunSummary {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// One `{key, value}` pair of the localization JSON API: key is the English
/// text (or the resource key), value the target-culture text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocalizationEntry {
    pub key: String,
    pub value: String,
}
