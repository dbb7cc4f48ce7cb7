//! Boundary between the lifecycle core and the rendering engine.

use std::sync::Arc;

use stran_common::{BrowserError, Geometry, NavAction, TabId, WindowId};

use crate::profile::ContentProfile;

/// Creates top-level windows and the content surfaces inside them.
///
/// Called from the control thread only; implementations may hold
/// thread-bound native handles.
pub trait ContentEngine {
    /// Create the native window for `window` and make it visible.
    fn open_window(&mut self, window: WindowId, geometry: Geometry) -> Result<(), BrowserError>;

    /// Create a surface for `tab` inside `window`, with the profile's
    /// scripts installed.
    fn create_surface(
        &mut self,
        window: WindowId,
        tab: TabId,
        profile: &Arc<ContentProfile>,
    ) -> Result<Box<dyn ContentSurface>, BrowserError>;

    /// Destroy the native window. Its surfaces have already been dropped.
    fn close_window(&mut self, window: WindowId);
}

/// One embedded document view. Dropping it releases the native view.
pub trait ContentSurface {
    fn load_url(&mut self, url: &str);

    fn trigger_action(&mut self, action: NavAction);

    /// Tell the page script whether translation is on
    /// (the `translationStateChanged` event).
    fn notify_translation_state(&mut self, enabled: bool);

    /// Hand a terminal job event (JSON) to the page script.
    fn deliver_translation(&mut self, payload: &str);

    /// Answer the page's pending bridge call `call` with `payload` (JSON).
    fn send_bridge_reply(&mut self, call: u64, payload: &str);

    fn set_visible(&mut self, visible: bool);
}
