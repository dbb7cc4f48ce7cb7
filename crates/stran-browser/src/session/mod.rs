//! The set of open windows and the profile they share.

use std::sync::Arc;

use stran_common::{BrowserError, Geometry, NewContextKind, SurfaceEvent, TabId, WindowId};
use stran_config::StranConfig;
use tracing::{debug, info};

use crate::engine::ContentEngine;
use crate::profile::{ContentProfile, InjectedScript};
use crate::window::{CloseDecision, Window};

/// How new windows and the shared profile are set up.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub profile_name: String,
    /// Installed into every page through the shared profile.
    pub scripts: Vec<InjectedScript>,
    /// Loaded into each window's first tab. Empty to leave it blank.
    pub home_url: String,
    pub initial_geometry: Geometry,
    /// Shift applied to a window opened from another window.
    pub cascade_offset: i32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            profile_name: "stran".into(),
            scripts: Vec::new(),
            home_url: String::new(),
            initial_geometry: Geometry::default(),
            cascade_offset: 20,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &StranConfig, scripts: Vec<InjectedScript>) -> Self {
        Self {
            scripts,
            home_url: config.browser.home_url.clone(),
            initial_geometry: config.window.geometry(),
            cascade_offset: config.window.cascade_offset,
            ..Default::default()
        }
    }
}

/// Owner of all windows.
///
/// Operations that may close a window collect its closing notification
/// before returning, so a closed window never lingers in [`windows`](Self::windows).
pub struct Session {
    options: SessionOptions,
    windows: Vec<Window>,
    profile: Option<Arc<ContentProfile>>,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            windows: Vec::new(),
            profile: None,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The shared profile, once the first window has created it.
    pub fn profile(&self) -> Option<&Arc<ContentProfile>> {
        self.profile.as_ref()
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window, BrowserError> {
        self.windows
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or(BrowserError::UnknownWindow(id))
    }

    /// The window whose container holds `tab`.
    pub fn window_of(&self, tab: TabId) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|w| w.container().contains(tab))
            .map(Window::id)
    }

    // =========================================================================
    // Window lifecycle
    // =========================================================================

    /// Create a window at the configured initial geometry.
    pub fn create_window(&mut self, engine: &mut dyn ContentEngine) -> Result<WindowId, BrowserError> {
        let geometry = self.options.initial_geometry;
        self.create_window_at(engine, geometry)
    }

    /// Create a window cascaded from `requester`.
    pub fn create_window_from(
        &mut self,
        engine: &mut dyn ContentEngine,
        requester: WindowId,
    ) -> Result<WindowId, BrowserError> {
        let geometry = self
            .window(requester)
            .ok_or(BrowserError::UnknownWindow(requester))?
            .geometry()
            .cascaded(self.options.cascade_offset);
        self.create_window_at(engine, geometry)
    }

    pub fn create_window_at(
        &mut self,
        engine: &mut dyn ContentEngine,
        geometry: Geometry,
    ) -> Result<WindowId, BrowserError> {
        let profile = self.shared_profile();
        let window = Window::create(engine, profile, geometry, &self.options.home_url)?;
        let id = window.id();
        self.windows.push(window);
        info!(window = %id, open = self.windows.len(), "window created");
        Ok(id)
    }

    /// Drop a closing window. Unknown ids are ignored, so repeated
    /// notifications are harmless.
    pub fn on_window_closing(&mut self, engine: &mut dyn ContentEngine, id: WindowId) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.id() == id) else {
            debug!(window = %id, "closing notice for untracked window");
            return false;
        };
        let mut window = self.windows.remove(index);
        window.flush_disposed();
        engine.close_window(id);
        info!(window = %id, open = self.windows.len(), "window removed");
        true
    }

    pub fn request_close(
        &mut self,
        engine: &mut dyn ContentEngine,
        id: WindowId,
    ) -> Result<CloseDecision, BrowserError> {
        let decision = self.window_mut(id)?.request_close();
        self.collect_closed(engine);
        decision
    }

    pub fn resolve_close(
        &mut self,
        engine: &mut dyn ContentEngine,
        id: WindowId,
        accepted: bool,
    ) -> Result<CloseDecision, BrowserError> {
        let decision = self.window_mut(id)?.resolve_close(accepted);
        self.collect_closed(engine);
        decision
    }

    /// Drop a pending close confirmation that can no longer be answered.
    pub fn cancel_close(&mut self, id: WindowId) -> Result<CloseDecision, BrowserError> {
        self.window_mut(id)?.resolve_close(false)
    }

    pub fn close_tab(
        &mut self,
        engine: &mut dyn ContentEngine,
        id: WindowId,
        index: usize,
    ) -> Result<(), BrowserError> {
        let result = self.window_mut(id)?.close_tab(index);
        self.collect_closed(engine);
        result
    }

    /// Close every window without confirmation.
    pub fn shutdown(&mut self, engine: &mut dyn ContentEngine) {
        for window in &mut self.windows {
            window.force_close();
        }
        self.collect_closed(engine);
    }

    /// Drop tabs removed since the last call, in every window.
    pub fn flush_disposed(&mut self) -> usize {
        self.windows.iter_mut().map(Window::flush_disposed).sum()
    }

    fn shared_profile(&mut self) -> Arc<ContentProfile> {
        let options = &self.options;
        let profile = self.profile.get_or_insert_with(|| {
            debug!(name = %options.profile_name, scripts = options.scripts.len(), "content profile created");
            Arc::new(ContentProfile::new(
                options.profile_name.clone(),
                options.scripts.clone(),
            ))
        });
        Arc::clone(profile)
    }

    fn collect_closed(&mut self, engine: &mut dyn ContentEngine) {
        let closing: Vec<WindowId> = self
            .windows
            .iter_mut()
            .filter_map(Window::take_closing_notice)
            .collect();
        for id in closing {
            self.on_window_closing(engine, id);
        }
    }

    // =========================================================================
    // Content events
    // =========================================================================

    /// Route a surface event to the window holding `tab`.
    ///
    /// A new-context request yields the tab that now hosts the new context.
    /// Events for tabs that no longer exist are dropped.
    pub fn handle_surface_event(
        &mut self,
        engine: &mut dyn ContentEngine,
        tab: TabId,
        event: &SurfaceEvent,
    ) -> Result<Option<TabId>, BrowserError> {
        let Some(window) = self.window_of(tab) else {
            debug!(tab_id = %tab, "event for closed tab dropped");
            return Ok(None);
        };

        if let SurfaceEvent::NewContextRequested { kind, url } = event {
            return self.open_new_context(engine, window, *kind, url).map(Some);
        }

        let result = self.window_mut(window)?.handle_surface_event(tab, event);
        self.collect_closed(engine);
        result.map(|()| None)
    }

    /// Provide a destination for content that asked for a new browsing
    /// context, then load `url` into it.
    pub fn open_new_context(
        &mut self,
        engine: &mut dyn ContentEngine,
        requester: WindowId,
        kind: NewContextKind,
        url: &str,
    ) -> Result<TabId, BrowserError> {
        let (window, tab) = match kind {
            NewContextKind::Tab => (
                requester,
                self.window_mut(requester)?.create_tab(engine, false)?,
            ),
            NewContextKind::BackgroundTab => (
                requester,
                self.window_mut(requester)?.create_tab(engine, true)?,
            ),
            NewContextKind::Window => {
                let window = self.create_window_from(engine, requester)?;
                let tab = self
                    .window(window)
                    .and_then(Window::active_tab_id)
                    .ok_or(BrowserError::UnknownWindow(window))?;
                (window, tab)
            }
        };

        debug!(window = %window, tab_id = %tab, ?kind, "new browsing context");
        if !url.is_empty() {
            self.window_mut(window)?.load_in(tab, url);
        }
        Ok(tab)
    }

    /// Hand a job's terminal event to the page in `tab`.
    ///
    /// Returns `false`, without error, when the tab has been closed since
    /// the job started.
    pub fn deliver_translation(&mut self, tab: TabId, payload: &str) -> bool {
        let delivered = self
            .windows
            .iter_mut()
            .any(|w| w.deliver_translation(tab, payload));
        if !delivered {
            debug!(tab_id = %tab, "stale translation delivery dropped");
        }
        delivered
    }

    /// Answer a pending bridge call from the page in `tab`.
    pub fn send_bridge_reply(&mut self, tab: TabId, call: u64, payload: &str) -> bool {
        let sent = self
            .windows
            .iter_mut()
            .any(|w| w.send_bridge_reply(tab, call, payload));
        if !sent {
            debug!(tab_id = %tab, call, "bridge reply for closed tab dropped");
        }
        sent
    }
}
