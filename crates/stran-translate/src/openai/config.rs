//! Chat-completions client configuration.

use std::time::Duration;

use stran_config::schema::TranslatorConfig;

/// Endpoint and model. The API key travels with each request instead,
/// since it comes from the job's settings snapshot.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub model: String,
    pub connect_timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl OpenAiConfig {
    pub fn from_translator(config: &TranslatorConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
