use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CultureCode;

/// One stored translation: a value for a (type, culture, key) triple.
///
/// Unique per `(resource_type, culture_code, resource_key)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranslationRecord {
    pub id: String,
    pub resource_type: String,
    pub culture_code: CultureCode,
    pub resource_key: String,
    pub resource_value: String,
    pub organization_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A translation to write, before the store has assigned it an id.
///
/// Produced by import parsing and by the machine-translation job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranslationInput {
    pub resource_type: String,
    pub culture_code: CultureCode,
    pub resource_key: String,
    pub resource_value: String,
}

impl TranslationInput {
    #[must_use]
    pub fn new(
        resource_type: impl Into<String>,
        culture_code: CultureCode,
        resource_key: impl Into<String>,
        resource_value: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            culture_code,
            resource_key: resource_key.into(),
            resource_value: resource_value.into(),
        }
    }
}
