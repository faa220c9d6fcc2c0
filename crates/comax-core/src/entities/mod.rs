//! Entity structs for all Comax domain objects.
//!
//! Stored entities map to a table in the libSQL resource store. `LocalizationRow`
//! is derived in memory and never stored. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema validation.

mod application;
mod audit;
mod language;
mod organization;
mod record;
mod row;

pub use application::{Application, ApplicationField};
pub use audit::AuditLogEntry;
pub use language::Language;
pub use organization::Organization;
pub use record::{TranslationInput, TranslationRecord};
pub use row::{LocalizationRow, Translation, Translations};
