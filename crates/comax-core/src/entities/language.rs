use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CultureCode, TextDirection};

/// A culture enabled in the console.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Language {
    pub id: String,
    pub code: CultureCode,
    pub name: String,
    pub native_name: String,
    pub direction: TextDirection,
    pub is_active: bool,
}
