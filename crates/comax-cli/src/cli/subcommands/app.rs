use clap::Subcommand;

/// Application and field commands. `APP` accepts an id or an application code.
#[derive(Clone, Debug, Subcommand)]
pub enum AppCommands {
    /// Create an application.
    Create {
        code: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List applications.
    List,
    /// Get an application with its fields.
    Get { app: String },
    /// Update an application.
    Update {
        app: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an application and its fields.
    Delete { app: String },
    /// Add a field; also creates its source-culture resource.
    FieldAdd {
        app: String,
        key: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        required: bool,
    },
    /// List an application's fields.
    Fields { app: String },
    /// Update a field.
    FieldUpdate {
        id: String,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        required: Option<bool>,
    },
    /// Delete a field.
    FieldDelete { id: String },
    /// Ensure every field has its source-culture resource.
    Sync { app: String },
}
