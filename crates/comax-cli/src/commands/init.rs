use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    store: String,
    remote: bool,
    languages: Vec<String>,
    resource_types: Vec<String>,
}

/// Handle `comax init`.
///
/// Opening the store already ran the migrations; this reports what is there.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let remote = ctx.service.db().is_remote();
    let store = if remote {
        ctx.config.store.url.clone()
    } else {
        flags
            .db
            .clone()
            .unwrap_or_else(|| ctx.config.store.path.clone())
    };

    let languages = ctx
        .service
        .active_cultures()
        .await?
        .into_iter()
        .map(|culture| culture.to_string())
        .collect();
    let resource_types = ctx.service.list_resource_types().await?;

    tracing::info!(%store, remote, "store ready");
    output(
        &InitResponse {
            store,
            remote,
            languages,
            resource_types,
        },
        flags.format,
    )
}
