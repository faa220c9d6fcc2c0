//! Audit log repository.
//!
//! Append-only entries recording every mutation, read back newest first with
//! optional filters.

use comax_core::entities::AuditLogEntry;
use comax_core::enums::{AuditAction, AuditTable};
use comax_core::ids::PREFIX_AUDIT;
use serde_json::Value;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, now_text, parse_datetime, parse_enum, parse_optional_json};
use crate::service::ComaxService;

/// Default cap on audit reads.
pub const DEFAULT_AUDIT_LIMIT: u32 = 50;

/// Per-row history cap.
pub const ROW_HISTORY_LIMIT: u32 = 20;

/// An audit entry before the store assigns id, username, and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditDraft {
    pub action: AuditAction,
    pub table: AuditTable,
    pub record_id: Option<String>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub description: String,
}

impl AuditDraft {
    #[must_use]
    pub fn new(action: AuditAction, table: AuditTable, description: impl Into<String>) -> Self {
        Self {
            action,
            table,
            record_id: None,
            old_value: None,
            new_value: None,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn with_record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    #[must_use]
    pub fn with_old(mut self, value: Value) -> Self {
        self.old_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_new(mut self, value: Value) -> Self {
        self.new_value = Some(value);
        self
    }
}

/// Filter criteria for audit queries.
#[derive(Debug, Default, Clone)]
pub struct AuditFilter {
    pub record_id: Option<String>,
    pub action: Option<AuditAction>,
    pub table: Option<AuditTable>,
    pub limit: Option<u32>,
}

impl AuditFilter {
    /// History of one record, capped at [`ROW_HISTORY_LIMIT`].
    #[must_use]
    pub fn for_record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            limit: Some(ROW_HISTORY_LIMIT),
            ..Self::default()
        }
    }
}

const SELECT_COLS: &str =
    "id, username, action_type, table_name, record_id, old_value, new_value, description, created_at";

fn row_to_entry(row: &libsql::Row) -> Result<AuditLogEntry, DatabaseError> {
    Ok(AuditLogEntry {
        id: row.get::<String>(0)?,
        username: row.get::<String>(1)?,
        action: parse_enum(&row.get::<String>(2)?)?,
        table_name: parse_enum(&row.get::<String>(3)?)?,
        record_id: get_opt_string(row, 4)?,
        old_value: parse_optional_json(get_opt_string(row, 5)?.as_deref())?,
        new_value: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        description: row.get::<Option<String>>(7)?.unwrap_or_default(),
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl ComaxService {
    /// Append an audit entry as the session's user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, draft: AuditDraft) -> Result<AuditLogEntry, DatabaseError> {
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        let (now, now_str) = now_text();
        let old_json = draft.old_value.as_ref().map(Value::to_string);
        let new_json = draft.new_value.as_ref().map(Value::to_string);

        self.db()
            .execute(
                "INSERT INTO audit_logs (id, username, action_type, table_name, record_id, old_value, new_value, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    self.session().username.as_str(),
                    draft.action.as_str(),
                    draft.table.as_str(),
                    draft.record_id.as_deref(),
                    old_json.as_deref(),
                    new_json.as_deref(),
                    draft.description.as_str(),
                    now_str
                ],
            )
            .await?;

        Ok(AuditLogEntry {
            id,
            username: self.session().username.clone(),
            action: draft.action,
            table_name: draft.table,
            record_id: draft.record_id,
            old_value: draft.old_value,
            new_value: draft.new_value,
            description: draft.description,
            created_at: now,
        })
    }

    /// Append an audit entry after a write that already succeeded.
    ///
    /// The write stands even if the audit insert fails; the failure is logged.
    pub async fn record_audit(&self, draft: AuditDraft) -> Option<AuditLogEntry> {
        let action = draft.action;
        let table = draft.table;
        match self.append_audit(draft).await {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(%action, %table, %error, "failed to append audit entry");
                None
            }
        }
    }

    /// Query audit entries newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref record_id) = filter.record_id {
            params.push(libsql::Value::Text(record_id.clone()));
            conditions.push(format!("record_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action_type = ?{}", params.len()));
        }
        if let Some(table) = filter.table {
            params.push(libsql::Value::Text(table.as_str().to_string()));
            conditions.push(format!("table_name = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_logs {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
