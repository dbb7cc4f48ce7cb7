//! Back/forward tracking for a single WebView.
//!
//! The engine does not report history state, so it is rebuilt from the
//! sequence of loaded URLs. A load of the entry just behind or ahead of the
//! cursor counts as a traversal, a load of the current entry as a reload,
//! anything else as a new visit that drops the forward entries.

use stran_common::{NavAction, SurfaceEvent};

#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a load of `url` and return the enablement changes it caused.
    pub fn record(&mut self, url: &str) -> Vec<SurfaceEvent> {
        let before = (self.can_go_back(), self.can_go_forward());

        if self.entries.is_empty() {
            self.entries.push(url.to_string());
            self.cursor = 0;
        } else if self.entries[self.cursor] == url {
            // reload
        } else if self.cursor > 0 && self.entries[self.cursor - 1] == url {
            self.cursor -= 1;
        } else if self.entries.get(self.cursor + 1).is_some_and(|e| e == url) {
            self.cursor += 1;
        } else {
            self.entries.truncate(self.cursor + 1);
            self.entries.push(url.to_string());
            self.cursor = self.entries.len() - 1;
        }

        let mut changes = Vec::new();
        if before.0 != self.can_go_back() {
            changes.push(SurfaceEvent::NavigationEnabledChanged {
                action: NavAction::Back,
                enabled: self.can_go_back(),
            });
        }
        if before.1 != self.can_go_forward() {
            changes.push(SurfaceEvent::NavigationEnabledChanged {
                action: NavAction::Forward,
                enabled: self.can_go_forward(),
            });
        }
        changes
    }
}
