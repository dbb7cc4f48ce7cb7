//! OpenAI chat-completions client.
//!
//! Implements [`TranslationClient`](crate::TranslationClient) against the
//! chat-completions API: one system instruction naming the target language,
//! one user message with the text, and the first choice's content as result.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
