//! Browsing behavior.

use serde::{Deserialize, Serialize};
use stran_common::NewContextKind;

/// Where pages asking for a new window (`target=_blank`, `window.open`) land.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NewWindowTarget {
    #[default]
    Tab,
    BackgroundTab,
    Window,
}

impl From<NewWindowTarget> for NewContextKind {
    fn from(target: NewWindowTarget) -> Self {
        match target {
            NewWindowTarget::Tab => NewContextKind::Tab,
            NewWindowTarget::BackgroundTab => NewContextKind::BackgroundTab,
            NewWindowTarget::Window => NewContextKind::Window,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Page loaded into every newly created tab.
    pub home_url: String,
    pub new_window_target: NewWindowTarget,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            home_url: "about:blank".into(),
            new_window_target: NewWindowTarget::Tab,
        }
    }
}
