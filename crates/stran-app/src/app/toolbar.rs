//! Pushing window chrome, settings and notifications to the toolbars.

use serde::Serialize;
use stran_browser::window::{CONFIRM_CLOSE_MESSAGE, CONFIRM_CLOSE_TITLE};
use stran_browser::{ChromeState, TabSummary, Window};
use stran_common::{WindowId, LANGUAGES};
use stran_config::SettingsProvider;

use super::core::StranApp;

/// Everything a toolbar draws for its window.
#[derive(Debug, Serialize)]
pub(super) struct ToolbarView<'a> {
    pub chrome: &'a ChromeState,
    pub tabs: Vec<TabSummary>,
}

impl<'a> ToolbarView<'a> {
    pub(super) fn of(window: &'a Window) -> Self {
        Self {
            chrome: window.chrome(),
            tabs: window.container().summaries(),
        }
    }
}

impl StranApp {
    /// Refresh every window's title and toolbar, and hand out queued
    /// notifications.
    pub(super) fn render_chrome(&mut self) {
        self.chrome_dirty = false;
        let notifications: Vec<_> = self
            .notifications
            .drain()
            .iter()
            .filter_map(|n| serde_json::to_value(n).ok())
            .collect();

        for window in self.session.windows() {
            let Some(native) = self.natives.get(window.id()) else {
                continue;
            };
            native.window.set_title(&window.title());
            let Some(toolbar) = &native.toolbar else {
                continue;
            };
            match serde_json::to_value(ToolbarView::of(window)) {
                Ok(view) => toolbar.send_ipc("chrome", &view),
                Err(e) => tracing::warn!(window = %window.id(), error = %e, "chrome encode failed"),
            }
            for n in &notifications {
                toolbar.send_ipc("notify", n);
            }
        }
    }

    /// Current translator settings for the toolbar's settings panel.
    /// The key itself never leaves the process.
    pub(super) fn send_settings(&self, window: WindowId) {
        let Some(toolbar) = self.natives.get(window).and_then(|n| n.toolbar.as_ref()) else {
            return;
        };
        let snapshot = self.settings.snapshot();
        let languages: Vec<_> = LANGUAGES
            .iter()
            .map(|l| serde_json::json!({ "code": l.code, "name": l.name }))
            .collect();
        toolbar.send_ipc(
            "settings",
            &serde_json::json!({
                "has_api_key": snapshot.has_api_key(),
                "target_language": snapshot.target_language,
                "languages": languages,
            }),
        );
    }

    /// Returns `false` when the window has no toolbar to show the prompt.
    pub(super) fn ask_close_confirmation(&self, window: WindowId) -> bool {
        let Some(toolbar) = self.natives.get(window).and_then(|n| n.toolbar.as_ref()) else {
            tracing::warn!(%window, "no toolbar to confirm close, keeping window open");
            return false;
        };
        toolbar.send_ipc(
            "confirm_close",
            &serde_json::json!({
                "title": CONFIRM_CLOSE_TITLE,
                "message": CONFIRM_CLOSE_MESSAGE,
            }),
        );
        true
    }
}
