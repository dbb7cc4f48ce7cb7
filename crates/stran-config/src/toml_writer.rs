//! Persisting [`StranConfig`] back to disk.
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the
//! target, so readers such as the reload watcher never see a partial file.

use std::path::Path;

use stran_common::{language_name, ConfigError};
use tracing::{debug, warn};

use crate::schema::{StranConfig, TranslatorConfig};

fn io_failure(action: &'static str, path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Replace the contents of `path`, creating parent directories.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_failure("create", parent, e))?;
    }

    let staging = path.with_extension("toml.tmp");
    std::fs::write(&staging, contents).map_err(|e| io_failure("write", &staging, e))?;

    if let Err(e) = std::fs::rename(&staging, path) {
        // rename over an open file can fail on Windows
        warn!(error = %e, "rename failed, writing config in place");
        let _ = std::fs::remove_file(&staging);
        std::fs::write(path, contents).map_err(|e| io_failure("write", path, e))?;
    }
    Ok(())
}

/// Serialize `config` and write it to `path`.
pub fn save_config_to_path(config: &StranConfig, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
    write_atomic(path, &text)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Update the API key and target language in `config` and persist it.
///
/// Rejects an empty key and unknown language codes without touching disk.
/// `config` is only updated once the file has been written.
pub fn save_translator_settings(
    config: &mut StranConfig,
    api_key: &str,
    target_language: &str,
    path: &Path,
) -> Result<TranslatorConfig, ConfigError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "Please enter an API key".into(),
        ));
    }
    if language_name(target_language).is_none() {
        return Err(ConfigError::ValidationError(format!(
            "unsupported target language '{target_language}'"
        )));
    }

    let mut updated = config.clone();
    updated.translator.api_key = api_key.to_string();
    updated.translator.target_language = target_language.to_string();
    save_config_to_path(&updated, path)?;

    *config = updated;
    Ok(config.translator.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_config_writes_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        save_config_to_path(&StranConfig::default(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: StranConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.translator.target_language, "ko");
        assert_eq!(parsed.window.width, 800);
    }

    #[test]
    fn save_config_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("config.toml");

        save_config_to_path(&StranConfig::default(), &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn translator_settings_are_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = StranConfig::default();

        let saved = save_translator_settings(&mut config, "  sk-abc  ", "de", &path).unwrap();
        assert_eq!(saved.api_key, "sk-abc");
        assert_eq!(saved.target_language, "de");

        let parsed: StranConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.translator.api_key, "sk-abc");
        assert_eq!(parsed.translator.target_language, "de");
    }

    #[test]
    fn empty_api_key_is_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = StranConfig::default();

        let err = save_translator_settings(&mut config, "   ", "ko", &path).unwrap_err();
        assert!(err.to_string().contains("Please enter an API key"));
        assert!(!path.exists());
        assert!(config.translator.api_key.is_empty());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = StranConfig::default();

        let err = save_translator_settings(&mut config, "sk-abc", "pt", &path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert_eq!(config.translator.target_language, "ko");
    }

    #[test]
    fn failed_write_leaves_config_untouched() {
        let dir = TempDir::new().unwrap();
        // a regular file where the parent directory should be
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");
        let mut config = StranConfig::default();

        let err = save_translator_settings(&mut config, "sk-new", "de", &path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(config.translator.api_key.is_empty());
        assert_eq!(config.translator.target_language, "ko");
    }
}
