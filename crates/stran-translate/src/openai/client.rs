//! Client struct, request building, and response parsing.

use crate::prompt::system_prompt;
use crate::{TranslateError, TranslationRequest};

use super::config::OpenAiConfig;

/// Chat-completions client. Cheap to share behind an `Arc`.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, TranslateError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TranslateError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Build the JSON request body.
    pub(crate) fn build_request_body(&self, request: &TranslationRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt(request.language_name),
                },
                {
                    "role": "user",
                    "content": request.text,
                },
            ],
        })
    }

    /// Pull the first choice's message content out of a response.
    pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, TranslateError> {
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.trim().to_string())
            .ok_or_else(|| TranslateError::Parse("response has no choices[0].message.content".into()))
    }
}
