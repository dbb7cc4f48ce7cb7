//! Locating and reading the TOML config file.
//!
//! The file lives at `<config dir>/stran/config.toml`. When it is missing
//! on the default path a commented template is written there first.

mod loader;
mod template;


use std::path::{Path, PathBuf};

use stran_common::ConfigError;
use tracing::info;

pub use loader::{load_default, load_from_path};

const APP_DIR: &str = "stran";
const FILE_NAME: &str = "config.toml";

/// `~/.config/stran/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`, creating its directory.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    crate::toml_writer::write_atomic(path, &template::default_config_toml())?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}
