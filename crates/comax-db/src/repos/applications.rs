//! Application and field repository.
//!
//! Applications group resource keys: an application's code is the
//! `resource_type` of its resources, and each field key is a resource key.

use comax_core::entities::{Application, ApplicationField, TranslationInput};
use comax_core::enums::{AuditAction, AuditTable, CultureCode};
use comax_core::ids::{PREFIX_APPLICATION, PREFIX_FIELD};
use comax_core::responses::SyncSummary;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, map_unique_violation, now_text, parse_datetime, require_non_empty,
};
use crate::repos::audit::AuditDraft;
use crate::service::ComaxService;

/// Culture whose resource is created alongside every new field.
pub const FIELD_SOURCE_CULTURE: CultureCode = CultureCode::HeIl;

const APP_COLS: &str =
    "id, application_code, application_name, description, created_at, updated_at";
const FIELD_COLS: &str = "id, application_id, field_key, field_name, description, is_required, created_at, updated_at";

/// Form values for creating or replacing an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInput {
    pub application_code: String,
    pub application_name: String,
    pub description: Option<String>,
}

/// Form values for creating or replacing a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub field_key: String,
    pub field_name: String,
    pub description: Option<String>,
    pub is_required: bool,
}

fn row_to_application(row: &libsql::Row) -> Result<Application, DatabaseError> {
    Ok(Application {
        id: row.get::<String>(0)?,
        application_code: row.get::<String>(1)?,
        application_name: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_field(row: &libsql::Row) -> Result<ApplicationField, DatabaseError> {
    Ok(ApplicationField {
        id: row.get::<String>(0)?,
        application_id: row.get::<String>(1)?,
        field_key: row.get::<String>(2)?,
        field_name: row.get::<String>(3)?,
        description: get_opt_string(row, 4)?,
        is_required: get_bool(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))
}

impl ComaxService {
    pub async fn create_application(
        &self,
        input: &ApplicationInput,
    ) -> Result<Application, DatabaseError> {
        require_non_empty("application_code", &input.application_code)?;
        require_non_empty("application_name", &input.application_name)?;

        let id = self.db().generate_id(PREFIX_APPLICATION).await?;
        let (now, now_str) = now_text();
        self.db()
            .execute(
                "INSERT INTO applications (id, application_code, application_name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    input.application_code.as_str(),
                    input.application_name.as_str(),
                    input.description.as_deref(),
                    now_str.as_str(),
                    now_str.as_str()
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(e, || format!("application code '{}'", input.application_code))
            })?;

        let app = Application {
            id: id.clone(),
            application_code: input.application_code.clone(),
            application_name: input.application_name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.record_audit(
            AuditDraft::new(
                AuditAction::Create,
                AuditTable::Applications,
                format!("Created application {}", app.application_code),
            )
            .with_record(id)
            .with_new(to_json(&app)?),
        )
        .await;
        Ok(app)
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {APP_COLS} FROM applications ORDER BY application_code"),
                (),
            )
            .await?;
        let mut apps = Vec::new();
        while let Some(row) = rows.next().await? {
            apps.push(row_to_application(&row)?);
        }
        Ok(apps)
    }

    pub async fn get_application(&self, id: &str) -> Result<Application, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {APP_COLS} FROM applications WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "application".into(),
            id: id.to_string(),
        })?;
        row_to_application(&row)
    }

    /// Look up an application by id or, failing that, by code.
    pub async fn resolve_application(&self, id_or_code: &str) -> Result<Application, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {APP_COLS} FROM applications WHERE id = ?1 OR application_code = ?1"
                ),
                [id_or_code],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "application".into(),
            id: id_or_code.to_string(),
        })?;
        row_to_application(&row)
    }

    pub async fn update_application(
        &self,
        id: &str,
        input: &ApplicationInput,
    ) -> Result<Application, DatabaseError> {
        require_non_empty("application_code", &input.application_code)?;
        require_non_empty("application_name", &input.application_name)?;
        let before = self.get_application(id).await?;

        let (_, now_str) = now_text();
        self.db()
            .execute(
                "UPDATE applications SET application_code = ?1, application_name = ?2, description = ?3, updated_at = ?4
                 WHERE id = ?5",
                libsql::params![
                    input.application_code.as_str(),
                    input.application_name.as_str(),
                    input.description.as_deref(),
                    now_str,
                    id
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(e, || format!("application code '{}'", input.application_code))
            })?;

        let after = self.get_application(id).await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Update,
                AuditTable::Applications,
                format!("Updated application {}", after.application_code),
            )
            .with_record(id)
            .with_old(to_json(&before)?)
            .with_new(to_json(&after)?),
        )
        .await;
        Ok(after)
    }

    /// Delete an application and, by cascade, its fields. Resources are kept.
    pub async fn delete_application(&self, id: &str) -> Result<(), DatabaseError> {
        let before = self.get_application(id).await?;
        self.db()
            .execute("DELETE FROM applications WHERE id = ?1", [id])
            .await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Delete,
                AuditTable::Applications,
                format!("Deleted application {}", before.application_code),
            )
            .with_record(id)
            .with_old(to_json(&before)?),
        )
        .await;
        Ok(())
    }

    /// Create a field and seed its source-culture resource.
    ///
    /// The resource carries the field name as its value so the key shows up
    /// in the grid right away. If that secondary insert fails (for example
    /// the resource already exists) the field is still created and the
    /// failure is only logged.
    pub async fn create_field(
        &self,
        application_id: &str,
        input: &FieldInput,
    ) -> Result<ApplicationField, DatabaseError> {
        require_non_empty("field_key", &input.field_key)?;
        require_non_empty("field_name", &input.field_name)?;
        let app = self.get_application(application_id).await?;

        let id = self.db().generate_id(PREFIX_FIELD).await?;
        let (now, now_str) = now_text();
        self.db()
            .execute(
                "INSERT INTO application_fields (id, application_id, field_key, field_name, description, is_required, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    app.id.as_str(),
                    input.field_key.as_str(),
                    input.field_name.as_str(),
                    input.description.as_deref(),
                    i64::from(input.is_required),
                    now_str.as_str(),
                    now_str.as_str()
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(e, || {
                    format!("field '{}' in {}", input.field_key, app.application_code)
                })
            })?;

        let field = ApplicationField {
            id: id.clone(),
            application_id: app.id.clone(),
            field_key: input.field_key.clone(),
            field_name: input.field_name.clone(),
            description: input.description.clone(),
            is_required: input.is_required,
            created_at: now,
            updated_at: now,
        };
        self.record_audit(
            AuditDraft::new(
                AuditAction::Create,
                AuditTable::ApplicationFields,
                format!("Created field {} in {}", field.field_key, app.application_code),
            )
            .with_record(id)
            .with_new(to_json(&field)?),
        )
        .await;

        let seed = TranslationInput::new(
            app.application_code.as_str(),
            FIELD_SOURCE_CULTURE,
            field.field_key.as_str(),
            field.field_name.as_str(),
        );
        if let Err(error) = self.insert_resource(&seed).await {
            tracing::warn!(
                field_key = %field.field_key,
                application = %app.application_code,
                %error,
                "field created but its source resource could not be inserted"
            );
        }

        Ok(field)
    }

    pub async fn list_fields(
        &self,
        application_id: &str,
    ) -> Result<Vec<ApplicationField>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {FIELD_COLS} FROM application_fields WHERE application_id = ?1 ORDER BY field_key"
                ),
                [application_id],
            )
            .await?;
        let mut fields = Vec::new();
        while let Some(row) = rows.next().await? {
            fields.push(row_to_field(&row)?);
        }
        Ok(fields)
    }

    pub async fn get_field(&self, id: &str) -> Result<ApplicationField, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {FIELD_COLS} FROM application_fields WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "field".into(),
            id: id.to_string(),
        })?;
        row_to_field(&row)
    }

    pub async fn update_field(
        &self,
        id: &str,
        input: &FieldInput,
    ) -> Result<ApplicationField, DatabaseError> {
        require_non_empty("field_key", &input.field_key)?;
        require_non_empty("field_name", &input.field_name)?;
        let before = self.get_field(id).await?;

        let (_, now_str) = now_text();
        self.db()
            .execute(
                "UPDATE application_fields SET field_key = ?1, field_name = ?2, description = ?3, is_required = ?4, updated_at = ?5
                 WHERE id = ?6",
                libsql::params![
                    input.field_key.as_str(),
                    input.field_name.as_str(),
                    input.description.as_deref(),
                    i64::from(input.is_required),
                    now_str,
                    id
                ],
            )
            .await
            .map_err(|e| map_unique_violation(e, || format!("field '{}'", input.field_key)))?;

        let after = self.get_field(id).await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Update,
                AuditTable::ApplicationFields,
                format!("Updated field {}", after.field_key),
            )
            .with_record(id)
            .with_old(to_json(&before)?)
            .with_new(to_json(&after)?),
        )
        .await;
        Ok(after)
    }

    pub async fn delete_field(&self, id: &str) -> Result<(), DatabaseError> {
        let before = self.get_field(id).await?;
        self.db()
            .execute("DELETE FROM application_fields WHERE id = ?1", [id])
            .await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Delete,
                AuditTable::ApplicationFields,
                format!("Deleted field {}", before.field_key),
            )
            .with_record(id)
            .with_old(to_json(&before)?),
        )
        .await;
        Ok(())
    }

    /// Make sure every field of an application has its source-culture resource.
    ///
    /// Fields whose resource already exists are skipped. Per-field failures
    /// are collected and do not stop the run.
    pub async fn sync_fields(&self, application_id: &str) -> Result<SyncSummary, DatabaseError> {
        let app = self.get_application(application_id).await?;
        let fields = self.list_fields(&app.id).await?;
        let mut summary = SyncSummary::default();

        for field in &fields {
            let existing = match self
                .find_resource(&app.application_code, FIELD_SOURCE_CULTURE, &field.field_key)
                .await
            {
                Ok(existing) => existing,
                Err(error) => {
                    summary.errors.push(format!("{}: {error}", field.field_key));
                    continue;
                }
            };
            if existing.is_some() {
                summary.skipped += 1;
                continue;
            }
            let seed = TranslationInput::new(
                app.application_code.as_str(),
                FIELD_SOURCE_CULTURE,
                field.field_key.as_str(),
                field.field_name.as_str(),
            );
            match self.insert_resource(&seed).await {
                Ok(_) => summary.synced += 1,
                Err(error) => summary.errors.push(format!("{}: {error}", field.field_key)),
            }
        }

        tracing::info!(
            application = %app.application_code,
            synced = summary.synced,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "synced application fields"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use crate::repos::audit::AuditFilter;
    use crate::test_support::test_service;

    use super::*;
    use pretty_assertions::assert_eq;

    fn app_input(code: &str) -> ApplicationInput {
        ApplicationInput {
            application_code: code.into(),
            application_name: format!("{code} name"),
            description: None,
        }
    }

    fn field_input(key: &str, name: &str) -> FieldInput {
        FieldInput {
            field_key: key.into(),
            field_name: name.into(),
            description: None,
            is_required: false,
        }
    }

    #[tokio::test]
    async fn application_crud_round_trip() {
        let svc = test_service().await;
        let app = svc.create_application(&app_input("WMS_APP")).await.unwrap();
        assert!(app.id.starts_with("app-"));

        let mut changed = app_input("WMS_APP");
        changed.description = Some("Warehouse".into());
        let updated = svc.update_application(&app.id, &changed).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Warehouse"));

        assert_eq!(svc.resolve_application("WMS_APP").await.unwrap().id, app.id);
        assert_eq!(svc.list_applications().await.unwrap().len(), 1);

        svc.delete_application(&app.id).await.unwrap();
        assert!(matches!(
            svc.get_application(&app.id).await,
            Err(DatabaseError::NotFound { .. })
        ));

        let trail = svc
            .query_audit(&AuditFilter::for_record(app.id.clone()))
            .await
            .unwrap();
        let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Delete, AuditAction::Update, AuditAction::Create]
        );
    }

    #[tokio::test]
    async fn duplicate_application_code_is_rejected() {
        let svc = test_service().await;
        svc.create_application(&app_input("A")).await.unwrap();
        let err = svc.create_application(&app_input("A")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)), "{err}");
    }

    #[tokio::test]
    async fn creating_a_field_seeds_its_hebrew_resource() {
        let svc = test_service().await;
        let app = svc.create_application(&app_input("PICK_APP")).await.unwrap();
        let field = svc
            .create_field(&app.id, &field_input("lbl_qty", "כמות"))
            .await
            .unwrap();
        assert_eq!(field.application_id, app.id);

        let resource = svc
            .find_resource("PICK_APP", CultureCode::HeIl, "lbl_qty")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resource.resource_value, "כמות");
    }

    #[tokio::test]
    async fn field_survives_when_its_resource_already_exists() {
        let svc = test_service().await;
        let app = svc.create_application(&app_input("PICK_APP")).await.unwrap();
        svc.insert_resource(&TranslationInput::new(
            "PICK_APP",
            CultureCode::HeIl,
            "lbl_qty",
            "קיים",
        ))
        .await
        .unwrap();

        svc.create_field(&app.id, &field_input("lbl_qty", "כמות"))
            .await
            .unwrap();
        assert_eq!(svc.list_fields(&app.id).await.unwrap().len(), 1);
        let resource = svc
            .find_resource("PICK_APP", CultureCode::HeIl, "lbl_qty")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resource.resource_value, "קיים");
    }

    #[tokio::test]
    async fn sync_fields_fills_only_missing_resources() {
        let svc = test_service().await;
        let app = svc.create_application(&app_input("PICK_APP")).await.unwrap();
        svc.create_field(&app.id, &field_input("a", "א")).await.unwrap();
        svc.create_field(&app.id, &field_input("b", "ב")).await.unwrap();

        // Simulate a field whose resource is missing.
        svc.db()
            .execute(
                "DELETE FROM localization_resources WHERE resource_key = 'b'",
                (),
            )
            .await
            .unwrap();

        let summary = svc.sync_fields(&app.id).await.unwrap();
        assert_eq!(
            summary,
            SyncSummary {
                synced: 1,
                skipped: 1,
                errors: vec![],
            }
        );
        let again = svc.sync_fields(&app.id).await.unwrap();
        assert_eq!(again.skipped, 2);
    }

    #[tokio::test]
    async fn deleting_an_application_cascades_fields() {
        let svc = test_service().await;
        let app = svc.create_application(&app_input("X")).await.unwrap();
        let field = svc.create_field(&app.id, &field_input("k", "n")).await.unwrap();
        svc.delete_application(&app.id).await.unwrap();
        assert!(matches!(
            svc.get_field(&field.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_and_delete_field() {
        let svc = test_service().await;
        let app = svc.create_application(&app_input("X")).await.unwrap();
        let field = svc.create_field(&app.id, &field_input("k", "n")).await.unwrap();

        let mut changed = field_input("k", "name");
        changed.is_required = true;
        let updated = svc.update_field(&field.id, &changed).await.unwrap();
        assert!(updated.is_required);
        assert_eq!(updated.field_name, "name");

        svc.delete_field(&field.id).await.unwrap();
        assert!(svc.list_fields(&app.id).await.unwrap().is_empty());
    }
}
