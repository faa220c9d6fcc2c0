use comax_core::enums::{CultureCode, TextDirection};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LanguageCommands;
use crate::commands::shared::parse::parse_culture;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CatalogueEntry {
    code: CultureCode,
    name: &'static str,
    native_name: &'static str,
    direction: TextDirection,
    added: bool,
}

#[derive(Debug, Serialize)]
struct RemovedResponse {
    removed: CultureCode,
}

/// Handle `comax language`.
pub async fn handle(
    action: &LanguageCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LanguageCommands::List => {
            let languages = ctx.service.list_languages().await?;
            output(&languages, flags.format)
        }
        LanguageCommands::Catalogue => {
            let added: Vec<CultureCode> = ctx
                .service
                .list_languages()
                .await?
                .into_iter()
                .map(|language| language.code)
                .collect();
            let entries: Vec<CatalogueEntry> = CultureCode::ALL
                .iter()
                .map(|&code| CatalogueEntry {
                    code,
                    name: code.english_name(),
                    native_name: code.native_name(),
                    direction: code.direction(),
                    added: added.contains(&code),
                })
                .collect();
            output(&entries, flags.format)
        }
        LanguageCommands::Add { code } => {
            let language = ctx.service.add_language(parse_culture(code)?).await?;
            output(&language, flags.format)
        }
        LanguageCommands::Activate { code } => {
            let language = ctx
                .service
                .set_language_active(parse_culture(code)?, true)
                .await?;
            output(&language, flags.format)
        }
        LanguageCommands::Deactivate { code } => {
            let language = ctx
                .service
                .set_language_active(parse_culture(code)?, false)
                .await?;
            output(&language, flags.format)
        }
        LanguageCommands::Remove { code } => {
            let culture = parse_culture(code)?;
            ctx.service.remove_language(culture).await?;
            output(&RemovedResponse { removed: culture }, flags.format)
        }
    }
}
