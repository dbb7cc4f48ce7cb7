//! S-Tran configuration system.
//!
//! TOML-based configuration with live reload and validation. Every
//! section uses serde defaults so a partial (or empty) file works.
//! Translator settings are exposed to the rest of the browser through
//! the [`SettingsProvider`] interface rather than read globally.
//!
//! ```rust,no_run
//! use stran_config::{load_config, SettingsProvider, SharedSettings};
//!
//! let config = load_config().expect("failed to load config");
//! let settings = SharedSettings::new(config.translator.clone());
//! println!("translating into {}", settings.snapshot().target_language);
//! ```

pub mod reload;
pub mod schema;
pub mod settings;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{StranConfig, CONFIG_SCHEMA_VERSION};
pub use settings::{SettingsProvider, SettingsSnapshot, SharedSettings, StaticSettings};
pub use toml_writer::{save_config_to_path, save_translator_settings};
pub use watcher::ConfigWatcher;

use std::path::Path;

use stran_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a commented default file if none exists, then validates.
pub fn load_config() -> Result<StranConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<StranConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[translator]\ntimeout_secs = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_accepts_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.translator.target_language, "ko");
        assert!(config.translator.api_key.is_empty());
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }
}
