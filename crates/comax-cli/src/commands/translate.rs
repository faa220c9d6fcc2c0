use std::time::Duration;

use anyhow::Context;
use comax_translate::{FillRequest, MyMemoryProvider, fill_missing};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TranslateArgs;
use crate::commands::shared::parse::{parse_culture, parse_cultures};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `comax translate --target CULTURE`.
pub async fn handle(
    args: &TranslateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let settings = &ctx.config.translate;
    let source = match args.source.as_deref() {
        Some(raw) => parse_culture(raw)?,
        None => settings.source_culture,
    };
    let targets = parse_cultures(&args.targets)?;

    let provider = MyMemoryProvider::new(
        &settings.endpoint,
        Duration::from_secs(settings.timeout_secs),
    )
    .context("failed to build translation client")?
    .with_contact_email(&settings.contact_email);

    let request = FillRequest::new(source, targets)
        .with_delay(Duration::from_millis(settings.delay_ms))
        .with_resource_types(args.resource_types.clone());

    let mut progress = Progress::bar("translating");
    let summary = match fill_missing(&ctx.service, &provider, &request, &mut progress).await {
        Ok(summary) => summary,
        Err(error) => {
            progress.finish_err("translation failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    if !summary.is_success() {
        tracing::warn!(errors = summary.errors, "some translations failed");
    }
    output(&summary, flags.format)
}
