//! # comax-config
//!
//! Layered configuration loading for Comax using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COMAX_*` prefix, `__` as separator)
//! 2. Project-level `.comax/config.toml`
//! 3. User-level `~/.config/comax/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `COMAX_STORE__URL` -> `store.url`, `COMAX_SESSION__USERNAME` -> `session.username`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use comax_config::ComaxConfig;
//!
//! let config = ComaxConfig::load_with_dotenv().expect("config");
//! if config.store.is_remote() {
//!     println!("Remote store: {}", config.store.url);
//! }
//! ```

mod error;
mod general;
mod grid;
mod import;
mod session;
mod store;
mod translate;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use grid::GridConfig;
pub use import::ImportConfig;
pub use session::SessionConfig;
pub use store::StoreConfig;
pub use translate::TranslateConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ComaxConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ComaxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".comax/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("COMAX_").split("__"))
    }

    /// Reject values no component can work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.page_size == 0 {
            return Err(invalid("store.page_size", "must be greater than zero"));
        }
        if self.grid.page_size == 0 {
            return Err(invalid("grid.page_size", "must be greater than zero"));
        }
        if self.grid.cultures.is_empty() {
            return Err(invalid("grid.cultures", "at least one culture column is required"));
        }
        if self.import.allowed_cultures.is_empty() {
            return Err(invalid("import.allowed_cultures", "at least one culture is required"));
        }
        if self.session.username.trim().is_empty() {
            return Err(invalid("session.username", "must not be empty"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("comax").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
