use crate::cli::GlobalFlags;
use crate::cli::root_commands::LocalizationArgs;
use crate::commands::shared::parse::parse_culture;
use crate::context::AppContext;
use crate::output::output;

/// Handle `comax localization TYPE CULTURE`.
pub async fn handle(
    args: &LocalizationArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let culture = parse_culture(&args.culture)?;
    let entries = ctx
        .service
        .localization_map(&args.resource_type, culture)
        .await?;
    output(&entries, flags.format)
}
