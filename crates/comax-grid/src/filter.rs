//! Multi-criteria row filtering.
//!
//! All active predicates must hold (logical AND). Filtering never mutates its
//! input and the default filter set is the identity.

use std::collections::BTreeSet;

use comax_core::entities::LocalizationRow;
use comax_core::enums::CultureCode;
use serde::{Deserialize, Serialize};

/// Which resource types pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeScope {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl TypeScope {
    /// Scope from a list of type names; an empty list means all types.
    #[must_use]
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = types.into_iter().map(Into::into).collect();
        if set.is_empty() { Self::All } else { Self::Only(set) }
    }

    fn admits(&self, resource_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(types) => types.contains(resource_type),
        }
    }
}

/// Where "only missing translations" looks for gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingScope {
    /// Any existing translation with a blank value.
    #[default]
    AnyCulture,
    /// The listed cultures: blank values and absent records both count.
    Cultures(BTreeSet<CultureCode>),
}

/// Search form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub resource_types: TypeScope,
    /// Case-insensitive substring of the resource key. Empty = no constraint.
    pub resource_key: String,
    /// Case-insensitive substring of any translation value. Empty = no constraint.
    pub resource_value: String,
    pub only_empty_values: bool,
    #[serde(default)]
    pub missing_scope: MissingScope,
}

impl SearchFilters {
    /// True when no predicate is active.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.resource_types == TypeScope::All
            && self.resource_key.is_empty()
            && self.resource_value.is_empty()
            && !self.only_empty_values
    }

    /// Prepare case-folded needles once for a whole pass.
    fn compile(&self) -> CompiledFilters<'_> {
        CompiledFilters {
            filters: self,
            key_needle: self.resource_key.to_lowercase(),
            value_needle: self.resource_value.to_lowercase(),
        }
    }
}

struct CompiledFilters<'a> {
    filters: &'a SearchFilters,
    key_needle: String,
    value_needle: String,
}

impl CompiledFilters<'_> {
    fn matches(&self, row: &LocalizationRow) -> bool {
        self.filters.resource_types.admits(&row.resource_type)
            && self.key_matches(row)
            && self.value_matches(row)
            && self.missing_matches(row)
    }

    fn key_matches(&self, row: &LocalizationRow) -> bool {
        self.key_needle.is_empty() || row.resource_key.to_lowercase().contains(&self.key_needle)
    }

    fn value_matches(&self, row: &LocalizationRow) -> bool {
        self.value_needle.is_empty()
            || row
                .translations
                .values()
                .any(|t| t.value.to_lowercase().contains(&self.value_needle))
    }

    fn missing_matches(&self, row: &LocalizationRow) -> bool {
        if !self.filters.only_empty_values {
            return true;
        }
        match &self.filters.missing_scope {
            MissingScope::AnyCulture => row.translations.values().any(|t| t.is_blank()),
            MissingScope::Cultures(cultures) => cultures
                .iter()
                .any(|c| row.translations.get(*c).is_none_or(|t| t.is_blank())),
        }
    }
}

/// Whether one row passes `filters`.
#[must_use]
pub fn matches(row: &LocalizationRow, filters: &SearchFilters) -> bool {
    filters.compile().matches(row)
}

/// Positions of the rows passing `filters`, in input order.
#[must_use]
pub fn filter_indices(rows: &[LocalizationRow], filters: &SearchFilters) -> Vec<usize> {
    if filters.is_identity() {
        return (0..rows.len()).collect();
    }
    let compiled = filters.compile();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| compiled.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// The rows passing `filters`, in input order.
#[must_use]
pub fn filter_rows(rows: &[LocalizationRow], filters: &SearchFilters) -> Vec<LocalizationRow> {
    filter_indices(rows, filters)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect()
}
