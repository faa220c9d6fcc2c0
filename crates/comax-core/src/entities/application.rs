use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A consuming application. Its `application_code` is the resource type of
/// every key it owns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub application_code: String,
    pub application_name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A field declared by an application; `field_key` doubles as a resource key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApplicationField {
    pub id: String,
    pub application_id: String,
    pub field_key: String,
    pub field_name: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
