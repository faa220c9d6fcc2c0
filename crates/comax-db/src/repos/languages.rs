//! Language repository: which catalogue cultures the console has enabled.

use comax_core::entities::Language;
use comax_core::enums::{AuditAction, AuditTable, CultureCode};
use comax_core::ids::PREFIX_LANGUAGE;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, map_unique_violation, now_text, parse_enum};
use crate::repos::audit::AuditDraft;
use crate::service::ComaxService;

const SELECT_COLS: &str = "id, code, name, native_name, direction, is_active";

fn row_to_language(row: &libsql::Row) -> Result<Language, DatabaseError> {
    Ok(Language {
        id: row.get::<String>(0)?,
        code: parse_enum(&row.get::<String>(1)?)?,
        name: row.get::<String>(2)?,
        native_name: row.get::<String>(3)?,
        direction: parse_enum(&row.get::<String>(4)?)?,
        is_active: get_bool(row, 5)?,
    })
}

impl ComaxService {
    /// All languages, active and inactive, ordered by code.
    pub async fn list_languages(&self) -> Result<Vec<Language>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {SELECT_COLS} FROM languages ORDER BY code"),
                (),
            )
            .await?;
        let mut languages = Vec::new();
        while let Some(row) = rows.next().await? {
            languages.push(row_to_language(&row)?);
        }
        Ok(languages)
    }

    /// Active cultures only.
    pub async fn active_cultures(&self) -> Result<Vec<CultureCode>, DatabaseError> {
        Ok(self
            .list_languages()
            .await?
            .into_iter()
            .filter(|l| l.is_active)
            .map(|l| l.code)
            .collect())
    }

    pub async fn get_language(&self, code: CultureCode) -> Result<Language, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {SELECT_COLS} FROM languages WHERE code = ?1"),
                [code.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "language".into(),
            id: code.to_string(),
        })?;
        row_to_language(&row)
    }

    /// Enable a catalogue culture, taking names and direction from the catalogue.
    pub async fn add_language(&self, code: CultureCode) -> Result<Language, DatabaseError> {
        let id = self.db().generate_id(PREFIX_LANGUAGE).await?;
        let (_, now_str) = now_text();
        self.db()
            .execute(
                "INSERT INTO languages (id, code, name, native_name, direction, is_active, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
                libsql::params![
                    id.as_str(),
                    code.as_str(),
                    code.english_name(),
                    code.native_name(),
                    code.direction().as_str(),
                    now_str
                ],
            )
            .await
            .map_err(|e| map_unique_violation(e, || format!("language {code}")))?;

        let language = Language {
            id: id.clone(),
            code,
            name: code.english_name().to_string(),
            native_name: code.native_name().to_string(),
            direction: code.direction(),
            is_active: true,
        };
        self.record_audit(
            AuditDraft::new(
                AuditAction::Create,
                AuditTable::Languages,
                format!("Added language {code}"),
            )
            .with_record(id)
            .with_new(serde_json::json!({"code": code, "is_active": true})),
        )
        .await;
        Ok(language)
    }

    /// Set `is_active` for `code`.
    pub async fn set_language_active(
        &self,
        code: CultureCode,
        active: bool,
    ) -> Result<Language, DatabaseError> {
        let before = self.get_language(code).await?;
        self.db()
            .execute(
                "UPDATE languages SET is_active = ?1 WHERE code = ?2",
                libsql::params![i64::from(active), code.as_str()],
            )
            .await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Update,
                AuditTable::Languages,
                format!(
                    "{} language {code}",
                    if active { "Activated" } else { "Deactivated" }
                ),
            )
            .with_record(before.id.clone())
            .with_old(serde_json::json!({"is_active": before.is_active}))
            .with_new(serde_json::json!({"is_active": active})),
        )
        .await;
        Ok(Language {
            is_active: active,
            ..before
        })
    }

    /// Remove a language. Resources in that culture are kept.
    pub async fn remove_language(&self, code: CultureCode) -> Result<(), DatabaseError> {
        let before = self.get_language(code).await?;
        self.db()
            .execute("DELETE FROM languages WHERE code = ?1", [code.as_str()])
            .await?;
        self.record_audit(
            AuditDraft::new(
                AuditAction::Delete,
                AuditTable::Languages,
                format!("Removed language {code}"),
            )
            .with_record(before.id)
            .with_old(serde_json::json!({"code": code, "is_active": before.is_active})),
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_service;

    use super::*;
    use comax_core::enums::TextDirection;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn defaults_are_seeded() {
        let svc = test_service().await;
        let mut codes: Vec<_> = svc
            .list_languages()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();
        codes.sort();
        assert_eq!(codes, CultureCode::DEFAULTS.to_vec());
        let hebrew = svc.get_language(CultureCode::HeIl).await.unwrap();
        assert_eq!(hebrew.direction, TextDirection::Rtl);
        assert_eq!(hebrew.native_name, "עברית");
    }

    #[tokio::test]
    async fn add_toggle_remove() {
        let svc = test_service().await;
        let fr = svc.add_language(CultureCode::FrFr).await.unwrap();
        assert_eq!(fr.native_name, "Français");
        assert!(svc.active_cultures().await.unwrap().contains(&CultureCode::FrFr));

        let off = svc
            .set_language_active(CultureCode::FrFr, false)
            .await
            .unwrap();
        assert!(!off.is_active);
        assert!(!svc.active_cultures().await.unwrap().contains(&CultureCode::FrFr));

        svc.remove_language(CultureCode::FrFr).await.unwrap();
        assert!(matches!(
            svc.get_language(CultureCode::FrFr).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn adding_an_existing_language_is_rejected() {
        let svc = test_service().await;
        let err = svc.add_language(CultureCode::HeIl).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)), "{err}");
    }
}
