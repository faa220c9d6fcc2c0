//! Edit and import reconciliation.
//!
//! Both flows write through the store first and touch in-memory rows only
//! with what the store confirmed. A cell edit splices the written record into
//! its row; an import re-fetches and re-aggregates the whole scope instead of
//! patching rows by hand.

use comax_core::entities::{AuditLogEntry, LocalizationRow, Translation, TranslationInput, TranslationRecord};
use comax_core::enums::{AuditAction, AuditTable, CultureCode};
use comax_core::responses::{EditKind, ImportSummary};
use comax_grid::edit::apply_confirmed;
use comax_grid::{Aggregation, GridView, aggregate};

use crate::error::DatabaseError;
use crate::repos::audit::AuditDraft;
use crate::repos::resources::ResourceScope;
use crate::service::ComaxService;

/// A confirmed cell save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub kind: EditKind,
    pub record: TranslationRecord,
    /// `None` when the write succeeded but the audit insert did not.
    pub audit: Option<AuditLogEntry>,
}

/// Result of an import batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub summary: ImportSummary,
    /// Fresh rows for the import scope, or `None` if the re-fetch failed and
    /// the caller must reload before showing rows again.
    pub refreshed: Option<Aggregation>,
}

fn value_json(value: &str) -> serde_json::Value {
    serde_json::json!({ "resource_value": value })
}

impl ComaxService {
    /// Write one cell: update by id when a record exists, insert otherwise.
    ///
    /// Appends the matching UPDATE or CREATE audit entry. Does not touch any
    /// in-memory row.
    ///
    /// # Errors
    ///
    /// Returns the store error from the update or insert.
    pub async fn write_cell(
        &self,
        resource_type: &str,
        resource_key: &str,
        culture: CultureCode,
        existing: Option<&Translation>,
        new_value: &str,
    ) -> Result<EditOutcome, DatabaseError> {
        let (kind, record, draft) = match existing {
            Some(current) => {
                let record = self.update_resource_value(&current.id, new_value).await?;
                let draft = AuditDraft::new(
                    AuditAction::Update,
                    AuditTable::LocalizationResources,
                    format!("Updated {resource_key} ({culture})"),
                )
                .with_record(record.id.as_str())
                .with_old(value_json(&current.value))
                .with_new(value_json(&record.resource_value));
                (EditKind::Updated, record, draft)
            }
            None => {
                let input = TranslationInput::new(resource_type, culture, resource_key, new_value);
                let record = self.insert_resource(&input).await?;
                let draft = AuditDraft::new(
                    AuditAction::Create,
                    AuditTable::LocalizationResources,
                    format!("Created {resource_key} ({culture})"),
                )
                .with_record(record.id.as_str())
                .with_new(serde_json::json!({
                    "resource_type": record.resource_type,
                    "culture_code": record.culture_code,
                    "resource_key": record.resource_key,
                    "resource_value": record.resource_value,
                }));
                (EditKind::Inserted, record, draft)
            }
        };

        let audit = self.record_audit(draft).await;
        tracing::debug!(key = resource_key, %culture, ?kind, "saved cell");
        Ok(EditOutcome {
            kind,
            record,
            audit,
        })
    }

    /// Save `new_value` into `row` for `culture`.
    ///
    /// On success the written value (and, for an insert, the new record id)
    /// is spliced into `row`. On any store error `row` is left unchanged and
    /// the error is returned; nothing is retried.
    ///
    /// # Errors
    ///
    /// - `DatabaseError::ScopeMissing` when an insert needs an organization the session lacks.
    /// - Any store error from the update or insert.
    pub async fn save_cell_edit(
        &self,
        row: &mut LocalizationRow,
        culture: CultureCode,
        new_value: &str,
    ) -> Result<EditOutcome, DatabaseError> {
        let existing = row.translations.get(culture).cloned();
        let outcome = self
            .write_cell(
                &row.resource_type,
                &row.resource_key,
                culture,
                existing.as_ref(),
                new_value,
            )
            .await?;
        apply_confirmed(
            row,
            culture,
            outcome.record.id.as_str(),
            outcome.record.resource_value.as_str(),
        );
        Ok(outcome)
    }

    /// Save a cell of a live grid view, holding the cell's in-flight guard
    /// for the duration of the store call.
    ///
    /// # Errors
    ///
    /// - `DatabaseError::Validation` if the row is unknown or the cell is already saving.
    /// - Any error from [`Self::save_cell_edit`]; the view is unchanged then.
    pub async fn save_view_edit(
        &self,
        view: &mut GridView,
        resource_key: &str,
        culture: CultureCode,
        new_value: &str,
    ) -> Result<EditOutcome, DatabaseError> {
        let pending = view
            .begin_edit(resource_key, culture)
            .map_err(|e| DatabaseError::Validation(e.to_string()))?;

        let result = self
            .write_cell(
                &pending.resource_type,
                resource_key,
                culture,
                pending.existing.as_ref(),
                new_value,
            )
            .await;

        let confirmed = result
            .as_ref()
            .ok()
            .map(|o| (o.record.id.clone(), o.record.resource_value.clone()));
        view.finish_edit(&pending, confirmed)
            .map_err(|e| DatabaseError::Validation(e.to_string()))?;
        result
    }

    /// Merge a validated batch into the store, one record at a time.
    ///
    /// Each record updates the existing `(type, culture, key)` match or is
    /// inserted. A failing record is reported in `summary.errors` and the
    /// batch moves on. Afterwards one IMPORT audit entry summarises the counts
    /// and `scope` is re-fetched and re-aggregated.
    ///
    /// # Errors
    ///
    /// This never fails for per-record problems; the `Result` is kept for
    /// symmetry with other store calls.
    pub async fn import_batch(
        &self,
        records: &[TranslationInput],
        scope: &ResourceScope,
    ) -> Result<ImportOutcome, DatabaseError> {
        let mut summary = ImportSummary::default();

        for (index, input) in records.iter().enumerate() {
            match self.import_one(input).await {
                Ok(EditKind::Inserted) => summary.added_count += 1,
                Ok(EditKind::Updated) => summary.updated_count += 1,
                Err(error) => {
                    tracing::warn!(
                        record = index + 1,
                        key = %input.resource_key,
                        culture = %input.culture_code,
                        %error,
                        "import record failed"
                    );
                    summary.error_count += 1;
                    summary.errors.push(format!(
                        "record {}: {} ({}): {error}",
                        index + 1,
                        input.resource_key,
                        input.culture_code
                    ));
                }
            }
        }
        summary.imported_count = summary.added_count + summary.updated_count;

        self.record_audit(
            AuditDraft::new(
                AuditAction::Import,
                AuditTable::LocalizationResources,
                format!(
                    "Imported {} records ({} added, {} updated, {} errors)",
                    summary.imported_count,
                    summary.added_count,
                    summary.updated_count,
                    summary.error_count
                ),
            )
            .with_new(serde_json::json!({
                "importedCount": summary.imported_count,
                "addedCount": summary.added_count,
                "updatedCount": summary.updated_count,
                "errorCount": summary.error_count,
            })),
        )
        .await;

        tracing::info!(
            imported = summary.imported_count,
            added = summary.added_count,
            updated = summary.updated_count,
            errors = summary.error_count,
            "import batch complete"
        );

        let refreshed = match self.fetch_all_resources(scope).await {
            Ok(all) => Some(aggregate(&all)),
            Err(error) => {
                tracing::warn!(%error, "re-fetch after import failed; rows must be reloaded");
                None
            }
        };

        Ok(ImportOutcome { summary, refreshed })
    }

    async fn import_one(&self, input: &TranslationInput) -> Result<EditKind, DatabaseError> {
        match self
            .find_resource(&input.resource_type, input.culture_code, &input.resource_key)
            .await?
        {
            Some(existing) => {
                self.update_resource_value(&existing.id, &input.resource_value)
                    .await?;
                Ok(EditKind::Updated)
            }
            None => {
                self.insert_resource(input).await?;
                Ok(EditKind::Inserted)
            }
        }
    }
}
