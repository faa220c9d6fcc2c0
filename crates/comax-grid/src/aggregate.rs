//! Row aggregation: flat translation records → one row per resource key.
//!
//! Input is the complete record set ordered by `(resource_key, culture_code)`.
//! Callers must page through the store until a short page comes back before
//! aggregating; a truncated input silently drops rows.

use std::collections::HashMap;

use comax_core::entities::{LocalizationRow, Translation, TranslationRecord};
use serde::Serialize;

/// A resource key whose records disagree on resource type.
///
/// The row keeps `kept_type` (first seen); `ignored_type` came from a later record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeConflict {
    pub resource_key: String,
    pub kept_type: String,
    pub ignored_type: String,
    pub record_id: String,
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// One row per distinct key, in first-seen order.
    pub rows: Vec<LocalizationRow>,
    pub type_conflicts: Vec<TypeConflict>,
}

/// Group records into rows keyed by `resource_key`.
///
/// Each record lands in its row's translation map under its culture. A later
/// record for the same `(key, culture)` replaces the earlier one, which only
/// happens when the store's uniqueness constraint is broken.
#[must_use]
pub fn aggregate(records: &[TranslationRecord]) -> Aggregation {
    let mut rows: Vec<LocalizationRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut type_conflicts = Vec::new();

    for record in records {
        let slot = *index.entry(record.resource_key.as_str()).or_insert_with(|| {
            rows.push(LocalizationRow::new(
                record.resource_key.clone(),
                record.resource_type.clone(),
            ));
            rows.len() - 1
        });
        let row = &mut rows[slot];

        if row.resource_type != record.resource_type {
            tracing::warn!(
                resource_key = %record.resource_key,
                kept = %row.resource_type,
                ignored = %record.resource_type,
                "resource key appears under more than one resource type; keeping first seen"
            );
            type_conflicts.push(TypeConflict {
                resource_key: record.resource_key.clone(),
                kept_type: row.resource_type.clone(),
                ignored_type: record.resource_type.clone(),
                record_id: record.id.clone(),
            });
        }

        row.translations.insert(
            record.culture_code,
            Translation::new(record.id.clone(), record.resource_value.clone()),
        );
    }

    tracing::debug!(
        records = records.len(),
        rows = rows.len(),
        conflicts = type_conflicts.len(),
        "aggregated translation records"
    );

    Aggregation {
        rows,
        type_conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use comax_core::enums::CultureCode;
    use pretty_assertions::assert_eq;

    fn record(id: &str, ty: &str, culture: CultureCode, key: &str, value: &str) -> TranslationRecord {
        TranslationRecord {
            id: id.into(),
            resource_type: ty.into(),
            culture_code: culture,
            resource_key: key.into(),
            resource_value: value.into(),
            organization_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn groups_cultures_under_one_row() {
        let records = vec![
            record("r1", "APP1", CultureCode::HeIl, "greet", "שלום"),
            record("r2", "APP1", CultureCode::EnUs, "greet", ""),
        ];

        let agg = aggregate(&records);

        assert_eq!(agg.rows.len(), 1);
        let row = &agg.rows[0];
        assert_eq!(row.resource_key, "greet");
        assert_eq!(row.value(CultureCode::HeIl), Some("שלום"));
        assert_eq!(row.value(CultureCode::EnUs), Some(""));
        assert_eq!(row.record_id(CultureCode::EnUs), Some("r2"));
        assert!(agg.type_conflicts.is_empty());
    }

    #[test]
    fn lossless_for_every_key_and_culture_pair() {
        let cultures = [CultureCode::HeIl, CultureCode::EnUs, CultureCode::RoRo];
        let mut records = Vec::new();
        for k in 0..7 {
            for (c, culture) in cultures.iter().enumerate() {
                if (k + c) % 3 == 0 {
                    continue;
                }
                records.push(record(
                    &format!("r{k}-{c}"),
                    "APP",
                    *culture,
                    &format!("key_{k}"),
                    &format!("v{k}{c}"),
                ));
            }
        }

        let agg = aggregate(&records);

        assert_eq!(agg.rows.len(), 7);
        let total: usize = agg.rows.iter().map(|r| r.translations.len()).sum();
        assert_eq!(total, records.len());
        for rec in &records {
            let matching: Vec<_> = agg
                .rows
                .iter()
                .filter(|r| r.resource_key == rec.resource_key)
                .collect();
            assert_eq!(matching.len(), 1);
            let t = matching[0].translations.get(rec.culture_code).unwrap();
            assert_eq!(t.id, rec.id);
            assert_eq!(t.value, rec.resource_value);
        }
    }

    #[test]
    fn keeps_first_seen_order() {
        let records = vec![
            record("1", "A", CultureCode::HeIl, "b_key", "x"),
            record("2", "A", CultureCode::HeIl, "a_key", "y"),
            record("3", "A", CultureCode::EnUs, "b_key", "z"),
        ];
        let keys: Vec<_> = aggregate(&records)
            .rows
            .into_iter()
            .map(|r| r.resource_key)
            .collect();
        assert_eq!(keys, vec!["b_key", "a_key"]);
    }

    #[test]
    fn conflicting_type_keeps_first_and_reports() {
        let records = vec![
            record("1", "APP1", CultureCode::HeIl, "greet", "שלום"),
            record("2", "APP2", CultureCode::EnUs, "greet", "Hello"),
        ];

        let agg = aggregate(&records);

        assert_eq!(agg.rows[0].resource_type, "APP1");
        assert_eq!(agg.rows[0].value(CultureCode::EnUs), Some("Hello"));
        assert_eq!(
            agg.type_conflicts,
            vec![TypeConflict {
                resource_key: "greet".into(),
                kept_type: "APP1".into(),
                ignored_type: "APP2".into(),
                record_id: "2".into(),
            }]
        );
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert_eq!(aggregate(&[]), Aggregation::default());
    }
}
