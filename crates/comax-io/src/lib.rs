//! # comax-io
//!
//! File formats at the edge of the console.
//!
//! - [`import`]: turns JSON, CSV, or Excel files into validated
//!   [`TranslationInput`](comax_core::entities::TranslationInput)s, mapping
//!   header spellings such as `resourceType`, `Resource Type`, and
//!   `resource_type` onto one canonical field.
//! - [`export`]: writes grid rows as CSV (one column per culture), flat records
//!   as CSV that re-imports cleanly, and `{key, value}` JSON maps.

pub mod error;
pub mod export;
pub mod import;

pub use error::IoError;
pub use export::{
    write_grid_csv, write_localization_json, write_records_csv, write_records_json,
};
pub use import::{ImportFormat, ParsedImport, parse_file, parse_str};
