//! Translation bridge for S-Tran.
//!
//! Page script asks for a translation, the [`JobDispatcher`] validates the
//! request, captures a settings snapshot and runs one background task per
//! job. Each task ends in exactly one [`JobCompletion`] tagged with its
//! [`JobId`](stran_common::JobId), which the control thread drains and
//! hands back to the page as a [`BridgeEvent`].
//!
//! The remote endpoint sits behind the [`TranslationClient`] trait so the
//! dispatcher can be exercised with fakes.

pub mod bridge;
pub mod dispatcher;
pub mod job;
pub mod openai;
pub mod prompt;

use std::time::Duration;

use async_trait::async_trait;

pub use bridge::{translation_state_detail, BridgeEvent, BridgeReply, TRANSLATION_STATE_EVENT};
pub use dispatcher::JobDispatcher;
pub use job::{AsyncJob, JobCompletion, JobHandle, JobOutcome, JobState};
pub use openai::{OpenAiClient, OpenAiConfig};

/// Everything a client needs for one request, taken from the job's snapshot.
#[derive(Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub api_key: String,
    /// Human-readable target language, e.g. `"한국어"`.
    pub language_name: &'static str,
}

impl std::fmt::Debug for TranslationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationRequest")
            .field("text_len", &self.text.len())
            .field("api_key", &"[REDACTED]")
            .field("language_name", &self.language_name)
            .finish()
    }
}

#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Translate `request.text`, returning only the translated text.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Rejected before any job was created.
    #[error("{0}")]
    Validation(String),
    #[error("Unknown target language: {0}")]
    UnknownLanguage(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
}
