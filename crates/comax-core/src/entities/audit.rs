use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AuditAction, AuditTable};

/// An append-only audit log entry recording a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: String,
    pub username: String,
    #[serde(rename = "action_type")]
    pub action: AuditAction,
    pub table_name: AuditTable,
    pub record_id: Option<String>,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
