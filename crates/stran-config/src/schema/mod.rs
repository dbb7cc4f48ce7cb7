//! Configuration schema types for S-Tran.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod browser;
mod system;
mod translator;
mod window;

pub use browser::*;
pub use system::*;
pub use translator::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StranConfig {
    pub translator: TranslatorConfig,
    pub window: WindowConfig,
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_translator_settings_exist() {
        let config = StranConfig::default();
        assert_eq!(config.translator.api_key, "");
        assert_eq!(config.translator.target_language, "ko");
        assert_eq!(config.translator.model, "gpt-4o-mini");
        assert_eq!(config.translator.timeout_secs, 30);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: StranConfig = toml::from_str(
            r#"
[translator]
target_language = "ja"

[window]
width = 1024
"#,
        )
        .unwrap();
        assert_eq!(config.translator.target_language, "ja");
        assert_eq!(config.translator.api_key, "");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.browser.new_window_target, NewWindowTarget::Tab);
    }

    #[test]
    fn new_window_target_parses_snake_case() {
        let config: StranConfig =
            toml::from_str("[browser]\nnew_window_target = \"background_tab\"\n").unwrap();
        assert_eq!(
            config.browser.new_window_target,
            NewWindowTarget::BackgroundTab
        );
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: StranConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.as_directive(), "debug");
    }

    #[test]
    fn unknown_log_level_is_a_parse_error() {
        let result: Result<StranConfig, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }
}
