use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CultureCode;

/// A stored translation as seen from a grid row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Translation {
    /// Store id of the backing `TranslationRecord`.
    pub id: String,
    pub value: String,
}

impl Translation {
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Empty or whitespace-only value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Per-culture translations of one resource key.
///
/// A missing entry means no record exists yet for that culture; it is never
/// represented as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct Translations(BTreeMap<CultureCode, Translation>);

impl Translations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, culture: CultureCode) -> Option<&Translation> {
        self.0.get(&culture)
    }

    #[must_use]
    pub fn contains(&self, culture: CultureCode) -> bool {
        self.0.contains_key(&culture)
    }

    /// Set the translation for `culture`, returning the previous one.
    pub fn insert(&mut self, culture: CultureCode, translation: Translation) -> Option<Translation> {
        self.0.insert(culture, translation)
    }

    pub fn get_mut(&mut self, culture: CultureCode) -> Option<&mut Translation> {
        self.0.get_mut(&culture)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CultureCode, &Translation)> {
        self.0.iter().map(|(culture, translation)| (*culture, translation))
    }

    pub fn values(&self) -> impl Iterator<Item = &Translation> {
        self.0.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One resource key with all of its per-culture translations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocalizationRow {
    pub resource_key: String,
    pub resource_type: String,
    pub translations: Translations,
}

impl LocalizationRow {
    #[must_use]
    pub fn new(resource_key: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            resource_key: resource_key.into(),
            resource_type: resource_type.into(),
            translations: Translations::new(),
        }
    }

    /// Value for `culture`, if a record exists.
    #[must_use]
    pub fn value(&self, culture: CultureCode) -> Option<&str> {
        self.translations.get(culture).map(|t| t.value.as_str())
    }

    /// Store id of the record backing `culture`, if any.
    #[must_use]
    pub fn record_id(&self, culture: CultureCode) -> Option<&str> {
        self.translations.get(culture).map(|t| t.id.as_str())
    }
}
