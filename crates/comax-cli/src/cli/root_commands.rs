use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{AppCommands, LanguageCommands, OrgCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the local store and seed default languages.
    Init,
    /// Search the translation grid.
    Search(SearchArgs),
    /// Save one cell of the grid.
    Edit(EditArgs),
    /// Import translations from a JSON, CSV, or Excel file.
    Import(ImportArgs),
    /// Export translations to CSV or JSON.
    Export(ExportArgs),
    /// Print the `{key, value}` localization map for one type and culture.
    Localization(LocalizationArgs),
    /// View the audit trail.
    Audit(AuditArgs),
    /// Machine-translate missing values from the source culture.
    Translate(TranslateArgs),
    /// Applications and their fields.
    App {
        #[command(subcommand)]
        action: AppCommands,
    },
    /// Grid languages.
    Language {
        #[command(subcommand)]
        action: LanguageCommands,
    },
    /// Organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
}

/// Arguments for `comax search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Resource type to include (repeatable; none means all).
    #[arg(long = "type")]
    pub resource_types: Vec<String>,
    /// Case-insensitive substring of the resource key.
    #[arg(long)]
    pub key: Option<String>,
    /// Case-insensitive substring of any translation value.
    #[arg(long)]
    pub value: Option<String>,
    /// Only rows with a blank translation.
    #[arg(long)]
    pub missing: bool,
    /// Look for gaps in these cultures only; absent records count too (repeatable).
    #[arg(long = "missing-in")]
    pub missing_in: Vec<String>,
    /// Sort column: `key` or a culture code.
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Pages to reveal (grid.page_size rows each).
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
    /// Reveal every matching row.
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,
}

/// Arguments for `comax edit`.
#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub key: String,
    pub culture: String,
    pub value: String,
    /// Resource type for a key that has no record yet in any loaded type.
    #[arg(long = "type")]
    pub resource_type: Option<String>,
}

/// Arguments for `comax import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// `.json` or `.csv` file.
    pub file: String,
    /// Abort on the first invalid row instead of skipping it.
    #[arg(long)]
    pub strict: bool,
    /// Resource types to re-fetch afterwards (repeatable; none means all).
    #[arg(long = "type")]
    pub resource_types: Vec<String>,
}

/// Export layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// One row per key, one column per grid culture.
    Grid,
    /// One line per stored record (re-importable).
    Records,
    /// Records as a JSON array (re-importable).
    RecordsJson,
    /// `{key, value}` map for one type and culture.
    Localization,
}

/// Arguments for `comax export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Output file.
    pub file: String,
    #[arg(long, value_enum, default_value = "grid")]
    pub kind: ExportKind,
    /// Resource type filter (repeatable). `localization` needs exactly one.
    #[arg(long = "type")]
    pub resource_types: Vec<String>,
    /// Target culture for `localization`.
    #[arg(long)]
    pub culture: Option<String>,
    /// Only rows with a blank translation (grid export).
    #[arg(long)]
    pub missing: bool,
}

/// Arguments for `comax localization`.
#[derive(Clone, Debug, Args)]
pub struct LocalizationArgs {
    pub resource_type: String,
    pub culture: String,
}

/// Arguments for `comax audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// History of one record (limit defaults to 20).
    #[arg(long)]
    pub record: Option<String>,
    /// CREATE, UPDATE, DELETE or IMPORT.
    #[arg(long)]
    pub action: Option<String>,
    /// Table name, e.g. `localization_resources`.
    #[arg(long)]
    pub table: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Arguments for `comax translate`.
#[derive(Clone, Debug, Args)]
pub struct TranslateArgs {
    /// Target culture (repeatable).
    #[arg(long = "target", required = true)]
    pub targets: Vec<String>,
    /// Source culture (defaults to translate.source_culture).
    #[arg(long)]
    pub source: Option<String>,
    /// Resource type to include (repeatable; none means all).
    #[arg(long = "type")]
    pub resource_types: Vec<String>,
}
