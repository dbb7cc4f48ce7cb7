use serde::{Deserialize, Serialize};

use super::core::{NavAction, NewContextKind};

/// Signals raised by a content surface, tagged with its tab by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SurfaceEvent {
    TitleChanged(String),
    UrlChanged(String),
    NavigationEnabledChanged { action: NavAction, enabled: bool },
    /// The document finished loading (injected scripts are live again).
    LoadFinished,
    /// The page asked to close its own browsing context.
    CloseRequested,
    NewContextRequested { kind: NewContextKind, url: String },
}
