use anyhow::Context;
use comax_core::entities::{AuditLogEntry, TranslationRecord};
use comax_core::responses::EditKind;
use comax_db::reconcile::EditOutcome;
use comax_db::repos::resources::ResourceScope;
use comax_grid::GridView;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EditArgs;
use crate::commands::shared::parse::parse_culture;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EditResponse {
    kind: EditKind,
    record: TranslationRecord,
    audit: Option<AuditLogEntry>,
}

impl From<EditOutcome> for EditResponse {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            kind: outcome.kind,
            record: outcome.record,
            audit: outcome.audit,
        }
    }
}

/// Handle `comax edit KEY CULTURE VALUE`.
///
/// Loads the grid, then saves the cell through it so an existing record is
/// updated by id and a missing one is inserted. A key with no record in any
/// type needs `--type` to know where the new record belongs.
pub async fn handle(args: &EditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let culture = parse_culture(&args.culture)?;

    let records = ctx
        .service
        .fetch_all_resources(&ResourceScope::all())
        .await
        .context("failed to load translations")?;
    let mut view = GridView::new(ctx.config.grid.page_size);
    view.load(&records);

    let loaded_type = view.row(&args.key).map(|row| row.resource_type.clone());
    let outcome = match (loaded_type, args.resource_type.as_deref()) {
        (Some(loaded), requested) => {
            if let Some(requested) = requested
                && requested != loaded
            {
                tracing::warn!(
                    key = %args.key,
                    requested,
                    %loaded,
                    "key already belongs to another resource type; saving under the loaded type"
                );
            }
            ctx.service
                .save_view_edit(&mut view, &args.key, culture, &args.value)
                .await
        }
        (None, Some(resource_type)) => {
            ctx.service
                .write_cell(resource_type, &args.key, culture, None, &args.value)
                .await
        }
        (None, None) => anyhow::bail!(
            "no record exists for key '{}'; pass --type to create it",
            args.key
        ),
    }
    .with_context(|| format!("failed to save {} ({culture})", args.key))?;

    output(&EditResponse::from(outcome), flags.format)
}
