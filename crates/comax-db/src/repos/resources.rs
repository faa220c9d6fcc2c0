//! Localization resource repository.
//!
//! Raw reads and writes on `localization_resources`. Audit entries are added by
//! the callers in [`crate::reconcile`], which know whether a write is an edit
//! or part of an import.

use std::collections::HashMap;

use comax_core::entities::{TranslationInput, TranslationRecord};
use comax_core::enums::CultureCode;
use comax_core::ids::PREFIX_RESOURCE;
use comax_core::responses::LocalizationEntry;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, map_unique_violation, now_text, parse_datetime, parse_enum, require_non_empty,
};
use crate::service::ComaxService;

const SELECT_COLS: &str = "id, resource_type, culture_code, resource_key, resource_value, organization_id, created_at, updated_at";

/// Which records a grid session loads. Empty lists mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceScope {
    pub resource_types: Vec<String>,
    pub cultures: Vec<CultureCode>,
}

impl ResourceScope {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Append `WHERE` conditions for this scope, numbering params after `params`.
    fn where_clause(&self, params: &mut Vec<libsql::Value>) -> String {
        let mut conditions = Vec::new();
        if !self.resource_types.is_empty() {
            let placeholders: Vec<String> = self
                .resource_types
                .iter()
                .map(|t| {
                    params.push(libsql::Value::Text(t.clone()));
                    format!("?{}", params.len())
                })
                .collect();
            conditions.push(format!("resource_type IN ({})", placeholders.join(", ")));
        }
        if !self.cultures.is_empty() {
            let placeholders: Vec<String> = self
                .cultures
                .iter()
                .map(|c| {
                    params.push(libsql::Value::Text(c.as_str().to_string()));
                    format!("?{}", params.len())
                })
                .collect();
            conditions.push(format!("culture_code IN ({})", placeholders.join(", ")));
        }
        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }
}

fn row_to_record(row: &libsql::Row) -> Result<TranslationRecord, DatabaseError> {
    Ok(TranslationRecord {
        id: row.get::<String>(0)?,
        resource_type: row.get::<String>(1)?,
        culture_code: parse_enum(&row.get::<String>(2)?)?,
        resource_key: row.get::<String>(3)?,
        resource_value: row.get::<Option<String>>(4)?.unwrap_or_default(),
        organization_id: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl ComaxService {
    /// One page of records ordered by `(resource_key, culture_code)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not parse.
    pub async fn fetch_resource_page(
        &self,
        scope: &ResourceScope,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<TranslationRecord>, DatabaseError> {
        let mut params = Vec::new();
        let where_clause = scope.where_clause(&mut params);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM localization_resources {where_clause}
             ORDER BY resource_key, culture_code, id LIMIT {limit} OFFSET {offset}"
        );
        let mut rows = self
            .db()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    /// Every record in `scope`, fetched page by page until a short page.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any page fails; partial results are discarded.
    pub async fn fetch_all_resources(
        &self,
        scope: &ResourceScope,
    ) -> Result<Vec<TranslationRecord>, DatabaseError> {
        let page_size = self.page_size();
        let mut all = Vec::new();
        let mut offset: u64 = 0;
        loop {
            let page = self.fetch_resource_page(scope, offset, page_size).await?;
            let fetched = page.len();
            all.extend(page);
            tracing::debug!(offset, fetched, "fetched resource page");
            if fetched < page_size as usize {
                break;
            }
            offset += fetched as u64;
        }
        Ok(all)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no record has `id`.
    pub async fn get_resource(&self, id: &str) -> Result<TranslationRecord, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {SELECT_COLS} FROM localization_resources WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "resource".into(),
            id: id.to_string(),
        })?;
        row_to_record(&row)
    }

    /// Look up a record by its unique triple.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_resource(
        &self,
        resource_type: &str,
        culture: CultureCode,
        resource_key: &str,
    ) -> Result<Option<TranslationRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM localization_resources
                     WHERE resource_type = ?1 AND culture_code = ?2 AND resource_key = ?3"
                ),
                libsql::params![resource_type, culture.as_str(), resource_key],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert a new record, stamped with the session's organization.
    ///
    /// # Errors
    ///
    /// - `DatabaseError::Validation` if type or key is empty, or the triple exists.
    /// - `DatabaseError::ScopeMissing` if an organization is required but absent.
    pub async fn insert_resource(
        &self,
        input: &TranslationInput,
    ) -> Result<TranslationRecord, DatabaseError> {
        require_non_empty("resource_type", &input.resource_type)?;
        require_non_empty("resource_key", &input.resource_key)?;
        let organization_id = self.insert_scope()?.map(String::from);

        let id = self.db().generate_id(PREFIX_RESOURCE).await?;
        let (now, now_str) = now_text();
        self.db()
            .execute(
                "INSERT INTO localization_resources
                 (id, resource_type, culture_code, resource_key, resource_value, organization_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    input.resource_type.as_str(),
                    input.culture_code.as_str(),
                    input.resource_key.as_str(),
                    input.resource_value.as_str(),
                    organization_id.as_deref(),
                    now_str.as_str(),
                    now_str.as_str()
                ],
            )
            .await
            .map_err(|e| {
                map_unique_violation(e, || {
                    format!(
                        "resource {}/{}/{}",
                        input.resource_type, input.culture_code, input.resource_key
                    )
                })
            })?;

        tracing::debug!(%id, key = %input.resource_key, culture = %input.culture_code, "inserted resource");
        Ok(TranslationRecord {
            id,
            resource_type: input.resource_type.clone(),
            culture_code: input.culture_code,
            resource_key: input.resource_key.clone(),
            resource_value: input.resource_value.clone(),
            organization_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the value of record `id`, returning the written row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no record has `id`.
    pub async fn update_resource_value(
        &self,
        id: &str,
        value: &str,
    ) -> Result<TranslationRecord, DatabaseError> {
        let (_, now_str) = now_text();
        let affected = self
            .db()
            .execute(
                "UPDATE localization_resources SET resource_value = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![value, now_str, id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "resource".into(),
                id: id.to_string(),
            });
        }
        tracing::debug!(%id, "updated resource value");
        self.get_resource(id).await
    }

    /// Distinct resource types, for the type filter.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_resource_types(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT DISTINCT resource_type FROM localization_resources ORDER BY resource_type",
                (),
            )
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(row.get::<String>(0)?);
        }
        Ok(types)
    }

    /// Key/value pairs for one application and culture.
    ///
    /// Each key is the English text of the resource (the resource key when no
    /// English text exists); each value is the `culture` text. Ordered by
    /// resource key.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query fails.
    pub async fn localization_map(
        &self,
        resource_type: &str,
        culture: CultureCode,
    ) -> Result<Vec<LocalizationEntry>, DatabaseError> {
        let scope = ResourceScope {
            resource_types: vec![resource_type.to_string()],
            cultures: vec![culture],
        };
        let selected = self.fetch_all_resources(&scope).await?;

        let english: HashMap<String, String> = if culture == CultureCode::EnUs {
            selected
                .iter()
                .map(|r| (r.resource_key.clone(), r.resource_value.clone()))
                .collect()
        } else {
            let scope = ResourceScope {
                resource_types: vec![resource_type.to_string()],
                cultures: vec![CultureCode::EnUs],
            };
            self.fetch_all_resources(&scope)
                .await?
                .into_iter()
                .map(|r| (r.resource_key, r.resource_value))
                .collect()
        };

        Ok(selected
            .into_iter()
            .map(|record| {
                let key = english
                    .get(&record.resource_key)
                    .filter(|text| !text.is_empty())
                    .cloned()
                    .unwrap_or(record.resource_key);
                LocalizationEntry {
                    key,
                    value: record.resource_value,
                }
            })
            .collect())
    }
}
