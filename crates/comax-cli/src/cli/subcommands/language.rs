use clap::Subcommand;

/// Language commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LanguageCommands {
    /// List languages, active and inactive.
    List,
    /// List every culture that can be added.
    Catalogue,
    /// Add a catalogue culture.
    Add { code: String },
    /// Mark a language active.
    Activate { code: String },
    /// Mark a language inactive.
    Deactivate { code: String },
    /// Remove a language.
    Remove { code: String },
}
