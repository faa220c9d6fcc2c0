//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_names_its_cause() {
        let errors = [
            ConfigError::Figment(figment::Error::from("bad toml".to_string())),
            ConfigError::InvalidValue {
                field: "grid.page_size".into(),
                reason: "must be at least 1".into(),
            },
        ];
        for err in &errors {
            let message = err.to_string();
            match err {
                ConfigError::Figment(_) => assert!(message.contains("bad toml"), "{message}"),
                ConfigError::InvalidValue { field, .. } => {
                    assert!(message.contains(field.as_str()), "{message}");
                }
            }
        }
    }
}
