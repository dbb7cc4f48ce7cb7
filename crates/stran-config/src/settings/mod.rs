//! Read-only access to translator settings.
//!
//! The dispatcher never reads config globally: it is handed a
//! [`SettingsProvider`] and takes a [`SettingsSnapshot`] when a job is
//! created. Later changes never reach a job that already started.

mod shared;

pub use shared::{SharedSettings, StaticSettings};

use std::fmt;

/// The settings a translation job needs, captured at job creation.
#[derive(Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub api_key: String,
    pub target_language: String,
}

impl SettingsSnapshot {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_language: "ko".into(),
        }
    }
}

impl fmt::Debug for SettingsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsSnapshot")
            .field("api_key", &if self.has_api_key() { "[REDACTED]" } else { "" })
            .field("target_language", &self.target_language)
            .finish()
    }
}

/// Source of the current translator settings. Readable at any time.
pub trait SettingsProvider: Send + Sync {
    fn snapshot(&self) -> SettingsSnapshot;
}
