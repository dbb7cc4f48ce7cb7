//! Full configuration validation.
//!
//! Each check pushes a message onto a shared list so one pass reports
//! every problem as a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::StranConfig;
use stran_common::{language_name, ConfigError};

use helpers::{validate_range, validate_range_i32};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &StranConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_translator(&mut errors, config);
    validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_translator(errors: &mut Vec<String>, config: &StranConfig) {
    let translator = &config.translator;
    validate_range(
        errors,
        "translator.timeout_secs",
        translator.timeout_secs,
        1,
        300,
    );
    if language_name(&translator.target_language).is_none() {
        errors.push(format!(
            "translator.target_language = '{}' is not a supported language",
            translator.target_language
        ));
    }
    if !translator.endpoint.starts_with("https://") && !translator.endpoint.starts_with("http://")
    {
        errors.push(format!(
            "translator.endpoint = '{}' must be an http(s) URL",
            translator.endpoint
        ));
    }
    if translator.model.trim().is_empty() {
        errors.push("translator.model must not be empty".into());
    }
}

fn validate_window(errors: &mut Vec<String>, config: &StranConfig) {
    let window = &config.window;
    validate_range(errors, "window.width", window.width as u64, 200, 10_000);
    validate_range(errors, "window.height", window.height as u64, 200, 10_000);
    validate_range_i32(
        errors,
        "window.cascade_offset",
        window.cascade_offset,
        0,
        200,
    );
}
