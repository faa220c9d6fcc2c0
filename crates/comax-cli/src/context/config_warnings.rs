use comax_config::ComaxConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &ComaxConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ComaxConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.store.is_remote() && has_env_prefix(&env_keys, "COMAX_STORE_") {
        warnings.push(
            "Store config appears local while COMAX_STORE_* env vars exist. Use double underscores (example: COMAX_STORE__URL)."
                .to_string(),
        );
    }

    if config.store.url.is_empty() != config.store.auth_token.is_empty() {
        warnings.push(
            "Only one of store.url and store.auth_token is set; using the local store.".to_string(),
        );
    }

    if config.session.organization_id.is_empty()
        && has_env_prefix(&env_keys, "COMAX_SESSION_ORGANIZATION")
    {
        warnings.push(
            "No organization selected while COMAX_SESSION_ORGANIZATION* env vars exist. Use double underscores (example: COMAX_SESSION__ORGANIZATION_ID)."
                .to_string(),
        );
    }

    if config.session.require_organization && config.session.organization_id.is_empty() {
        warnings.push(
            "session.require_organization is set but no organization is selected; inserts will fail."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
