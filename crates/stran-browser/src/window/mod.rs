//! Top-level window: one tab container plus the chrome it projects.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use stran_common::{
    BrowserError, Geometry, NavAction, NotificationQueue, SurfaceEvent, TabId, WindowId,
};
use stran_config::SettingsProvider;
use tracing::{debug, info};

use crate::address::url_from_user_input;
use crate::container::TabContainer;
use crate::engine::ContentEngine;
use crate::profile::ContentProfile;
use crate::signals::{ChromeState, ContainerSignal};

pub const CONFIRM_CLOSE_TITLE: &str = "Confirm close";
pub const CONFIRM_CLOSE_MESSAGE: &str = "Are you sure you want to close the window?";

static NEXT_WINDOW_ID: AtomicU32 = AtomicU32::new(1);

fn next_window_id() -> WindowId {
    WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Open,
    /// Close was requested with several tabs open; waiting for the user.
    ConfirmPending,
    /// Terminal. Every further operation fails with `WindowDisposed`.
    Disposed,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// The window is closing; its session will drop it.
    Closing,
    /// Ask the user, then call [`Window::resolve_close`].
    NeedsConfirmation,
    /// Nothing changed.
    Cancelled,
}

pub struct Window {
    id: WindowId,
    geometry: Geometry,
    container: TabContainer,
    chrome: ChromeState,
    state: WindowState,
    /// Set once on disposal, taken once by the session.
    closing_notice: bool,
}

impl Window {
    /// Open the native window and its initial tab.
    pub(crate) fn create(
        engine: &mut dyn ContentEngine,
        profile: Arc<ContentProfile>,
        geometry: Geometry,
        home_url: &str,
    ) -> Result<Self, BrowserError> {
        let id = next_window_id();
        engine.open_window(id, geometry)?;

        let mut window = Self {
            id,
            geometry,
            container: TabContainer::new(id, profile),
            chrome: ChromeState::default(),
            state: WindowState::Open,
            closing_notice: false,
        };

        match window.container.create_tab(engine, false) {
            Ok((tab, signals)) => {
                window.apply(signals);
                if !home_url.is_empty() {
                    window.container.load_in(tab, home_url);
                }
            }
            Err(e) => {
                engine.close_window(id);
                return Err(e);
            }
        }

        Ok(window)
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Record a move or resize done by the window system.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.state == WindowState::Disposed
    }

    pub fn chrome(&self) -> &ChromeState {
        &self.chrome
    }

    pub fn title(&self) -> String {
        self.chrome.window_title()
    }

    pub fn container(&self) -> &TabContainer {
        &self.container
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.container.active_tab().map(|t| t.id())
    }

    // =========================================================================
    // Closing
    // =========================================================================

    /// Ask to close. With more than one tab the user must confirm first.
    ///
    /// The tab count is checked on every request, so a prompt left open
    /// while tabs went away does not block closing a single-tab window.
    pub fn request_close(&mut self) -> Result<CloseDecision, BrowserError> {
        self.ensure_live()?;
        if self.container.len() <= 1 {
            self.dispose();
            return Ok(CloseDecision::Closing);
        }
        if self.state != WindowState::ConfirmPending {
            self.state = WindowState::ConfirmPending;
            debug!(window = %self.id, tabs = self.container.len(), "close needs confirmation");
        }
        Ok(CloseDecision::NeedsConfirmation)
    }

    /// Answer a pending confirmation. Declining leaves everything as it was.
    pub fn resolve_close(&mut self, accepted: bool) -> Result<CloseDecision, BrowserError> {
        self.ensure_live()?;
        if self.state != WindowState::ConfirmPending {
            return Ok(CloseDecision::Cancelled);
        }
        if accepted {
            self.dispose();
            Ok(CloseDecision::Closing)
        } else {
            self.state = WindowState::Open;
            Ok(CloseDecision::Cancelled)
        }
    }

    /// Close without asking (last tab gone, or application shutdown).
    pub(crate) fn force_close(&mut self) {
        self.dispose();
    }

    /// The closing notification. Yields `Some` exactly once per window.
    pub(crate) fn take_closing_notice(&mut self) -> Option<WindowId> {
        std::mem::take(&mut self.closing_notice).then_some(self.id)
    }

    fn dispose(&mut self) {
        if self.state == WindowState::Disposed {
            return;
        }
        info!(window = %self.id, "window closing");
        self.state = WindowState::Disposed;
        self.container.close_all();
        self.closing_notice = true;
    }

    fn ensure_live(&self) -> Result<(), BrowserError> {
        if self.is_disposed() {
            Err(BrowserError::WindowDisposed(self.id))
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Tabs
    // =========================================================================

    pub fn create_tab(
        &mut self,
        engine: &mut dyn ContentEngine,
        background: bool,
    ) -> Result<TabId, BrowserError> {
        self.ensure_live()?;
        let (tab, signals) = self.container.create_tab(engine, background)?;
        self.apply(signals);
        Ok(tab)
    }

    pub fn close_tab(&mut self, index: usize) -> Result<(), BrowserError> {
        self.ensure_live()?;
        let signals = self.container.close_tab(index);
        self.apply(signals);
        Ok(())
    }

    pub fn close_active_tab(&mut self) -> Result<(), BrowserError> {
        match self.container.active_index() {
            Some(index) => self.close_tab(index),
            None => self.ensure_live(),
        }
    }

    pub fn select_tab(&mut self, index: usize) -> Result<(), BrowserError> {
        self.ensure_live()?;
        let signals = self.container.set_active(index);
        self.apply(signals);
        Ok(())
    }

    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<bool, BrowserError> {
        self.ensure_live()?;
        Ok(self.container.move_tab(from, to))
    }

    /// Load what the user typed into the address field.
    ///
    /// Returns `false` if the text is not a usable address or there is no
    /// active tab.
    pub fn navigate(&mut self, input: &str) -> Result<bool, BrowserError> {
        self.ensure_live()?;
        let Some(url) = url_from_user_input(input) else {
            debug!(window = %self.id, input, "ignoring unusable address");
            return Ok(false);
        };
        Ok(self.container.set_url(&url))
    }

    pub fn trigger_navigation_action(&mut self, action: NavAction) -> Result<bool, BrowserError> {
        self.ensure_live()?;
        Ok(self.container.trigger_navigation_action(action))
    }

    pub fn toggle_translation(
        &mut self,
        settings: &dyn SettingsProvider,
        notifications: &mut NotificationQueue,
    ) -> Result<(), BrowserError> {
        self.ensure_live()?;
        let signals = self.container.toggle_translation(settings, notifications);
        self.apply(signals);
        Ok(())
    }

    pub fn handle_surface_event(&mut self, tab: TabId, event: &SurfaceEvent) -> Result<(), BrowserError> {
        self.ensure_live()?;
        let signals = self.container.handle_surface_event(tab, event);
        self.apply(signals);
        Ok(())
    }

    pub(crate) fn load_in(&mut self, tab: TabId, url: &str) -> bool {
        !self.is_disposed() && self.container.load_in(tab, url)
    }

    pub(crate) fn deliver_translation(&mut self, tab: TabId, payload: &str) -> bool {
        !self.is_disposed() && self.container.deliver_translation(tab, payload)
    }

    pub(crate) fn send_bridge_reply(&mut self, tab: TabId, call: u64, payload: &str) -> bool {
        !self.is_disposed() && self.container.send_bridge_reply(tab, call, payload)
    }

    pub fn flush_disposed(&mut self) -> usize {
        self.container.flush_disposed()
    }

    fn apply(&mut self, signals: Vec<ContainerSignal>) {
        for signal in signals {
            match signal {
                ContainerSignal::Tab(signal) => self.chrome.apply(&signal),
                ContainerSignal::CloseRequested => self.dispose(),
            }
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("tabs", &self.container.len())
            .field("chrome", &self.chrome)
            .finish()
    }
}

#[cfg(test)]
mod tests;
