//! Translator configuration: API credentials and target language.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Settings for the remote translation endpoint.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Bearer token for the endpoint. Empty means translation is unavailable.
    pub api_key: String,
    /// Target language code; one of the codes in `stran_common::LANGUAGES`.
    pub target_language: String,
    pub model: String,
    pub endpoint: String,
    /// Per-request timeout in seconds (valid range: 1-300).
    pub timeout_secs: u64,
}

impl fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("api_key", &"[REDACTED]")
            .field("target_language", &self.target_language)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_language: "ko".into(),
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            timeout_secs: 30,
        }
    }
}
