use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::handle(ctx, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Edit(args) => commands::edit::handle(&args, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Localization(args) => commands::localization::handle(&args, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Translate(args) => commands::translate::handle(&args, ctx, flags).await,
        Commands::App { action } => commands::app::handle(&action, ctx, flags).await,
        Commands::Language { action } => commands::language::handle(&action, ctx, flags).await,
        Commands::Org { action } => commands::org::handle(&action, ctx, flags).await,
    }
}
