use std::path::Path;

use stran_common::ConfigError;
use tracing::{debug, info, warn};

use super::{create_default_config, default_config_path};
use crate::schema::StranConfig;
use crate::validation;

/// Parse the file at `path`. Sections and fields it leaves out keep their
/// defaults.
///
/// Validation problems are only logged here; [`crate::load_config_from`]
/// is the strict entry point.
pub fn load_from_path(path: &Path) -> Result<StranConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config: StranConfig = toml::from_str(&text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has invalid values: {e}");
    }
    debug!(path = %path.display(), "config parsed");
    Ok(config)
}

/// Read the config from [`default_config_path`], seeding the template
/// on first run.
pub fn load_default() -> Result<StranConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "first run, creating config");
            create_default_config(&path)?;
            Ok(StranConfig::default())
        }
        other => other,
    }
}
