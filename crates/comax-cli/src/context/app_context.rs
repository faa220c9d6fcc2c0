use std::path::Path;

use anyhow::Context;
use comax_config::ComaxConfig;
use comax_db::service::ComaxService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ComaxService,
    pub config: ComaxConfig,
}

impl AppContext {
    /// Open the resource store for the configured session.
    ///
    /// A remote store is used when `store.url` and `store.auth_token` are both
    /// set, unless `--db` points at a local file.
    pub async fn init(config: ComaxConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let session = config.session.to_context();

        let service = match flags.db.as_deref() {
            Some(path) => open_local(path, session).await?,
            None if config.store.is_remote() => {
                ComaxService::new_remote(&config.store.url, &config.store.auth_token, session)
                    .await
                    .context("failed to connect to the remote store")?
            }
            None => open_local(&config.store.path, session).await?,
        };
        let service = service.with_page_size(config.store.page_size);

        Ok(Self { service, config })
    }

    /// In-memory store with default configuration.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let config = ComaxConfig::default();
        let service = ComaxService::new_local(":memory:", config.session.to_context())
            .await
            .expect("in-memory store should open");
        Self { service, config }
    }
}

async fn open_local(
    path: &str,
    session: comax_core::identity::SessionContext,
) -> anyhow::Result<ComaxService> {
    if path != ":memory:"
        && let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    ComaxService::new_local(path, session)
        .await
        .with_context(|| format!("failed to open local store {path}"))
}
