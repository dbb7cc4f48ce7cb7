//! JSON payloads exchanged with the page-side `translator` object.
//!
//! `translate(text)` is answered with a [`BridgeReply`]; the job's result
//! arrives later as a [`BridgeEvent`]. Both are plain JSON strings so the
//! page can `JSON.parse` them directly.

use serde::{Deserialize, Serialize};
use stran_common::JobId;

/// Name of the `CustomEvent` dispatched on `window` when a tab's
/// translation flag changes. Its `detail` is `{ enabled: bool }`.
pub const TRANSLATION_STATE_EVENT: &str = "translationStateChanged";

/// Synchronous answer to a `translate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BridgeReply {
    Accepted { worker: JobId },
    Rejected { error: String },
}

impl BridgeReply {
    pub fn to_json(&self) -> String {
        match self {
            BridgeReply::Accepted { worker } => serde_json::json!({ "worker": worker }),
            BridgeReply::Rejected { error } => serde_json::json!({ "error": error }),
        }
        .to_string()
    }
}

/// Terminal event for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BridgeEvent {
    Translated {
        worker: JobId,
        translated_text: String,
    },
    Failed {
        worker: JobId,
        error: String,
    },
}

impl BridgeEvent {
    pub fn worker(&self) -> &JobId {
        match self {
            BridgeEvent::Translated { worker, .. } | BridgeEvent::Failed { worker, .. } => worker,
        }
    }

    pub fn to_json(&self) -> String {
        match self {
            BridgeEvent::Translated {
                worker,
                translated_text,
            } => serde_json::json!({ "worker": worker, "translated_text": translated_text }),
            BridgeEvent::Failed { worker, error } => {
                serde_json::json!({ "worker": worker, "error": error })
            }
        }
        .to_string()
    }
}

/// Detail object for [`TRANSLATION_STATE_EVENT`].
pub fn translation_state_detail(enabled: bool) -> String {
    serde_json::json!({ "enabled": enabled }).to_string()
}
