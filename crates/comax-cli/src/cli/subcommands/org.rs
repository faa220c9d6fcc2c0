use clap::Subcommand;

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Create an organization.
    Create { number: String, name: String },
    /// List organizations.
    List,
    /// Get an organization by ID.
    Get { id: String },
    /// Rename an organization.
    Rename { id: String, name: String },
    /// Delete an organization.
    Delete { id: String },
}
