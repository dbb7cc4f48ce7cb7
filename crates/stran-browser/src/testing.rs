//! In-memory engine and surfaces for lifecycle tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use stran_common::{BrowserError, Geometry, NavAction, TabId, WindowId};

use crate::engine::{ContentEngine, ContentSurface};
use crate::profile::ContentProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Load(String),
    Action(NavAction),
    TranslationState(bool),
    Deliver(String),
    Reply(u64, String),
    Visible(bool),
}

/// Records every call; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct FakeSurface {
    log: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl FakeSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.log.borrow().clone()
    }

    /// Calls other than visibility changes.
    pub fn content_calls(&self) -> Vec<SurfaceCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, SurfaceCall::Visible(_)))
            .collect()
    }

    pub fn last_visibility(&self) -> Option<bool> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            SurfaceCall::Visible(v) => Some(*v),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, call: SurfaceCall) {
        self.log.borrow_mut().push(call);
    }
}

impl ContentSurface for FakeSurface {
    fn load_url(&mut self, url: &str) {
        self.record(SurfaceCall::Load(url.to_string()));
    }

    fn trigger_action(&mut self, action: NavAction) {
        self.record(SurfaceCall::Action(action));
    }

    fn notify_translation_state(&mut self, enabled: bool) {
        self.record(SurfaceCall::TranslationState(enabled));
    }

    fn deliver_translation(&mut self, payload: &str) {
        self.record(SurfaceCall::Deliver(payload.to_string()));
    }

    fn send_bridge_reply(&mut self, call: u64, payload: &str) {
        self.record(SurfaceCall::Reply(call, payload.to_string()));
    }

    fn set_visible(&mut self, visible: bool) {
        self.record(SurfaceCall::Visible(visible));
    }
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub opened: Vec<(WindowId, Geometry)>,
    pub closed: Vec<WindowId>,
    pub surfaces: HashMap<TabId, FakeSurface>,
    pub profiles: Vec<Arc<ContentProfile>>,
    pub fail_surfaces: bool,
}

impl FakeEngine {
    pub fn surface(&self, tab: TabId) -> &FakeSurface {
        &self.surfaces[&tab]
    }
}

impl ContentEngine for FakeEngine {
    fn open_window(&mut self, window: WindowId, geometry: Geometry) -> Result<(), BrowserError> {
        self.opened.push((window, geometry));
        Ok(())
    }

    fn create_surface(
        &mut self,
        _window: WindowId,
        tab: TabId,
        profile: &Arc<ContentProfile>,
    ) -> Result<Box<dyn ContentSurface>, BrowserError> {
        if self.fail_surfaces {
            return Err(BrowserError::Surface("surface creation disabled".into()));
        }
        self.profiles.push(Arc::clone(profile));
        let surface = FakeSurface::default();
        self.surfaces.insert(tab, surface.clone());
        Ok(Box::new(surface))
    }

    fn close_window(&mut self, window: WindowId) {
        self.closed.push(window);
    }
}
