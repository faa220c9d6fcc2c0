//! ID prefix constants.
//!
//! Store IDs are `{prefix}-{8 hex chars}`, generated by the database.

pub const PREFIX_RESOURCE: &str = "res";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_APPLICATION: &str = "app";
pub const PREFIX_FIELD: &str = "fld";
pub const PREFIX_LANGUAGE: &str = "lng";
pub const PREFIX_ORGANIZATION: &str = "org";

/// Every prefix in use.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_RESOURCE,
    PREFIX_AUDIT,
    PREFIX_APPLICATION,
    PREFIX_FIELD,
    PREFIX_LANGUAGE,
    PREFIX_ORGANIZATION,
];
