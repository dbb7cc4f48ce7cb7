//! WebView lifecycle management.
//!
//! `WebViewManager` builds the `wry::WebView`s of every window: one
//! toolbar per window and one content surface per tab. Callbacks run on
//! the UI thread and only record [`WebViewEvent`]s; the event loop drains
//! them and feeds the session.

use std::sync::{Arc, Mutex};

use stran_common::NewContextKind;

use crate::events::WebViewEvent;
use crate::pages::InternalPages;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::{ToolbarHandle, WebViewHandle};
pub use types::WebViewConfig;

pub struct WebViewManager {
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    pub(crate) pages: Arc<InternalPages>,
    pub(crate) config: WebViewConfig,
    /// Read by every content surface when it asks for a new context, so a
    /// change reaches tabs that already exist.
    pub(crate) new_window_kind: Arc<Mutex<NewContextKind>>,
}

impl WebViewManager {
    pub fn new(config: WebViewConfig, pages: InternalPages) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            pages: Arc::new(pages),
            new_window_kind: Arc::new(Mutex::new(config.new_window_kind)),
            config,
        }
    }

    pub fn new_window_kind(&self) -> NewContextKind {
        current_kind(&self.new_window_kind)
    }

    pub fn set_new_window_kind(&self, kind: NewContextKind) {
        match self.new_window_kind.lock() {
            Ok(mut current) => *current = kind,
            Err(poisoned) => *poisoned.into_inner() = kind,
        }
    }

    /// Drain all pending events, oldest first.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    #[cfg(test)]
    pub(crate) fn push_event(&self, event: WebViewEvent) {
        push(&self.events, event);
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new(WebViewConfig::default(), InternalPages::new())
    }
}

pub(crate) fn current_kind(kind: &Mutex<NewContextKind>) -> NewContextKind {
    match kind.lock() {
        Ok(kind) => *kind,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

pub(crate) fn push(events: &Mutex<Vec<WebViewEvent>>, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}
