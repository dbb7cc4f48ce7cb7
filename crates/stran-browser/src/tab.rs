//! A single content surface and the state mirrored from it.

use std::sync::atomic::{AtomicU32, Ordering};

use stran_common::{NavAction, Notification, NotificationQueue, SurfaceEvent, TabId};
use stran_config::SettingsProvider;
use tracing::debug;

use crate::engine::ContentSurface;
use crate::signals::{TabSignal, TabState};

pub const NEW_TAB_LABEL: &str = "New Tab";

static NEXT_TAB_ID: AtomicU32 = AtomicU32::new(1);

/// Allocate a process-unique tab id.
pub(crate) fn next_tab_id() -> TabId {
    TabId(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
}

pub struct Tab {
    id: TabId,
    state: TabState,
    surface: Box<dyn ContentSurface>,
}

impl Tab {
    pub(crate) fn new(id: TabId, surface: Box<dyn ContentSurface>) -> Self {
        Self {
            id,
            state: TabState::default(),
            surface,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn state(&self) -> &TabState {
        &self.state
    }

    pub fn title(&self) -> &str {
        &self.state.title
    }

    pub fn url(&self) -> &str {
        &self.state.url
    }

    pub fn is_translation_enabled(&self) -> bool {
        self.state.translation_enabled
    }

    pub fn is_action_enabled(&self, action: NavAction) -> bool {
        match action {
            NavAction::Back => self.state.can_go_back,
            NavAction::Forward => self.state.can_go_forward,
            NavAction::Reload => true,
        }
    }

    /// Text for the tab strip.
    pub fn label(&self) -> &str {
        if self.state.title.is_empty() {
            NEW_TAB_LABEL
        } else {
            &self.state.title
        }
    }

    pub fn load_url(&mut self, url: &str) {
        self.surface.load_url(url);
    }

    pub fn trigger_action(&mut self, action: NavAction) {
        self.surface.trigger_action(action);
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.surface.set_visible(visible);
    }

    /// Fold a surface event into the tab's state.
    ///
    /// Returns the signal to pass on, if the event changed anything the
    /// chrome shows. Close and new-context requests are not tab state and
    /// yield `None`.
    pub fn handle_surface_event(&mut self, event: &SurfaceEvent) -> Option<TabSignal> {
        match event {
            SurfaceEvent::TitleChanged(title) => {
                self.state.title.clone_from(title);
                Some(TabSignal::TitleChanged(title.clone()))
            }
            SurfaceEvent::UrlChanged(url) => {
                self.state.url.clone_from(url);
                Some(TabSignal::UrlChanged(url.clone()))
            }
            SurfaceEvent::NavigationEnabledChanged { action, enabled } => {
                let slot = match action {
                    NavAction::Back => &mut self.state.can_go_back,
                    NavAction::Forward => &mut self.state.can_go_forward,
                    NavAction::Reload => return None,
                };
                if *slot == *enabled {
                    return None;
                }
                *slot = *enabled;
                Some(TabSignal::NavigationEnabledChanged {
                    action: *action,
                    enabled: *enabled,
                })
            }
            SurfaceEvent::LoadFinished => {
                // a fresh document starts with translation off; resync it
                self.surface
                    .notify_translation_state(self.state.translation_enabled);
                None
            }
            SurfaceEvent::CloseRequested | SurfaceEvent::NewContextRequested { .. } => None,
        }
    }

    /// Flip the translation flag, if an API key is configured.
    ///
    /// Without a key a warning is queued and nothing changes.
    pub fn toggle_translation(
        &mut self,
        settings: &dyn SettingsProvider,
        notifications: &mut NotificationQueue,
    ) -> Option<TabSignal> {
        if !settings.snapshot().has_api_key() {
            notifications.push(Notification::warning(
                "Warning",
                "Please set an API key in the settings.",
            ));
            return None;
        }

        let enabled = !self.state.translation_enabled;
        self.state.translation_enabled = enabled;
        self.surface.notify_translation_state(enabled);
        debug!(tab_id = %self.id, enabled, "translation toggled");
        Some(TabSignal::TranslationEnabledChanged(enabled))
    }

    pub fn deliver_translation(&mut self, payload: &str) {
        self.surface.deliver_translation(payload);
    }

    pub fn send_bridge_reply(&mut self, call: u64, payload: &str) {
        self.surface.send_bridge_reply(call, payload);
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
