//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and file manipulation.

use comax_config::ComaxConfig;
use comax_core::enums::CultureCode;
use pretty_assertions::assert_eq;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_store_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
path = "./translations.db"
url = "libsql://comax.turso.io"
auth_token = "store-token"
page_size = 250
"#,
        )?;

        let config: ComaxConfig = Figment::from(Serialized::defaults(ComaxConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.path, "./translations.db");
        assert_eq!(config.store.url, "libsql://comax.turso.io");
        assert_eq!(config.store.auth_token, "store-token");
        assert_eq!(config.store.page_size, 250);
        assert!(config.store.is_remote());
        Ok(())
    });
}

#[test]
fn loads_grid_and_import_cultures_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[grid]
page_size = 25
cultures = ["he-IL", "ar-SA"]

[import]
allowed_cultures = ["he-IL", "en-US", "ro-RO", "th-TH"]
"#,
        )?;

        let config: ComaxConfig = Figment::from(Serialized::defaults(ComaxConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.grid.page_size, 25);
        assert_eq!(config.grid.cultures, vec![CultureCode::HeIl, CultureCode::ArSa]);
        assert_eq!(config.import.allowed_cultures.len(), 4);
        // Unset fields keep their defaults
        assert_eq!(config.grid.load_delay_ms, 300);
        Ok(())
    });
}

#[test]
fn unknown_culture_in_toml_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[grid]
cultures = ["he-IL", "xx-XX"]
"#,
        )?;

        let result: Result<ComaxConfig, _> =
            Figment::from(Serialized::defaults(ComaxConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();

        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".comax")?;
        jail.create_file(
            ".comax/config.toml",
            r#"
[session]
username = "translator1"
organization_id = "org-42"
require_organization = true

[translate]
source_culture = "he-IL"
delay_ms = 0
"#,
        )?;

        let config = ComaxConfig::load().expect("config loads");
        let session = config.session.to_context();
        assert_eq!(session.username, "translator1");
        assert_eq!(session.organization_id.as_deref(), Some("org-42"));
        assert!(session.require_organization);
        assert_eq!(config.translate.delay_ms, 0);
        Ok(())
    });
}
