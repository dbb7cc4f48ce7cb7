//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&StranConfig::default()).is_ok());
}

#[test]
fn empty_api_key_is_valid() {
    // Translation is simply unavailable until a key is configured.
    let mut config = StranConfig::default();
    config.translator.api_key.clear();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_timeout() {
    let mut config = StranConfig::default();
    config.translator.timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("translator.timeout_secs"));
}

#[test]
fn catches_unknown_language() {
    let mut config = StranConfig::default();
    config.translator.target_language = "klingon".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("translator.target_language"));
}

#[test]
fn catches_non_http_endpoint() {
    let mut config = StranConfig::default();
    config.translator.endpoint = "ftp://example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("translator.endpoint"));
}

#[test]
fn catches_tiny_window() {
    let mut config = StranConfig::default();
    config.window.width = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_negative_cascade_offset() {
    let mut config = StranConfig::default();
    config.window.cascade_offset = -5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.cascade_offset"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = StranConfig::default();
    config.translator.timeout_secs = 1000;
    config.window.height = 50_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("translator.timeout_secs"));
    assert!(err.contains("window.height"));
    assert!(err.contains("; "));
}
