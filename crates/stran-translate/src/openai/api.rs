//! TranslationClient implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{TranslateError, TranslationClient, TranslationRequest};

use super::client::OpenAiClient;

#[async_trait]
impl TranslationClient for OpenAiClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let body = self.build_request_body(request);

        debug!(model = %self.config.model, language = request.language_name, "translation request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&request.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Transport(format!("request timed out: {e}"))
                } else {
                    TranslateError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(TranslateError::Remote {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        Self::parse_response(&json)
    }
}
