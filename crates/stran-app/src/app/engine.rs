//! `ContentEngine` over winit windows and wry WebViews.

use std::collections::HashMap;
use std::rc::Weak;
use std::sync::Arc;

use stran_browser::{ContentEngine, ContentProfile, ContentSurface};
use stran_common::{BrowserError, Geometry, TabId, WindowId};
use stran_webview::layout::{content_bounds, toolbar_bounds};
use stran_webview::{page_url, ToolbarHandle, WebViewManager};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::types::TOOLBAR_PAGE;

/// Native resources of one browser window. Field order is drop order:
/// the WebViews go before the window they are children of.
pub(super) struct NativeWindow {
    pub(super) toolbar: Option<ToolbarHandle>,
    pub(super) surfaces: Vec<Weak<wry::WebView>>,
    pub(super) window: Arc<winit::window::Window>,
}

impl NativeWindow {
    /// Inner size in logical pixels.
    pub(super) fn logical_size(&self) -> (f64, f64) {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        (size.width, size.height)
    }

    /// Re-place the toolbar and every live content surface.
    pub(super) fn layout(&mut self) {
        let (width, height) = self.logical_size();
        if let Some(toolbar) = &self.toolbar {
            if let Err(e) = toolbar.set_bounds(toolbar_bounds(width, height)) {
                tracing::warn!(window = %toolbar.window(), error = %e, "toolbar resize failed");
            }
        }
        self.surfaces.retain(|weak| weak.strong_count() > 0);
        for webview in self.surfaces.iter().filter_map(Weak::upgrade) {
            if let Err(e) = webview.set_bounds(content_bounds(width, height)) {
                tracing::warn!(error = %e, "content resize failed");
            }
        }
    }
}

#[derive(Default)]
pub(super) struct NativeWindows {
    windows: HashMap<WindowId, NativeWindow>,
    by_winit: HashMap<winit::window::WindowId, WindowId>,
}

impl NativeWindows {
    pub(super) fn get(&self, id: WindowId) -> Option<&NativeWindow> {
        self.windows.get(&id)
    }

    pub(super) fn get_mut(&mut self, id: WindowId) -> Option<&mut NativeWindow> {
        self.windows.get_mut(&id)
    }

    /// The browser window behind a winit window id.
    pub(super) fn lookup(&self, winit_id: winit::window::WindowId) -> Option<WindowId> {
        self.by_winit.get(&winit_id).copied()
    }

    pub(super) fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    fn insert(&mut self, id: WindowId, native: NativeWindow) {
        self.by_winit.insert(native.window.id(), id);
        self.windows.insert(id, native);
    }

    fn remove(&mut self, id: WindowId) -> Option<NativeWindow> {
        let native = self.windows.remove(&id)?;
        self.by_winit.remove(&native.window.id());
        Some(native)
    }
}

/// Borrowed view of the app's native state, handed to the session for the
/// duration of one call.
pub(super) struct WryEngine<'a> {
    event_loop: &'a ActiveEventLoop,
    natives: &'a mut NativeWindows,
    webviews: &'a WebViewManager,
}

impl<'a> WryEngine<'a> {
    pub(super) fn new(
        event_loop: &'a ActiveEventLoop,
        natives: &'a mut NativeWindows,
        webviews: &'a WebViewManager,
    ) -> Self {
        Self {
            event_loop,
            natives,
            webviews,
        }
    }
}

impl ContentEngine for WryEngine<'_> {
    fn open_window(&mut self, id: WindowId, geometry: Geometry) -> Result<(), BrowserError> {
        let attrs = WindowAttributes::default()
            .with_title("S-Tran")
            .with_position(winit::dpi::LogicalPosition::new(geometry.x, geometry.y))
            .with_inner_size(winit::dpi::LogicalSize::new(
                geometry.width as f64,
                geometry.height as f64,
            ));

        let window = self
            .event_loop
            .create_window(attrs)
            .map(Arc::new)
            .map_err(|e| BrowserError::Engine(format!("failed to create window: {e}")))?;

        let (width, height) = (geometry.width as f64, geometry.height as f64);
        let toolbar = match self.webviews.create_toolbar(
            &*window,
            id,
            toolbar_bounds(width, height),
            &page_url(TOOLBAR_PAGE),
        ) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::error!(window = %id, error = %e, "failed to create toolbar");
                None
            }
        };

        tracing::info!(window = %id, "native window opened");
        self.natives.insert(
            id,
            NativeWindow {
                toolbar,
                surfaces: Vec::new(),
                window,
            },
        );
        Ok(())
    }

    fn create_surface(
        &mut self,
        window: WindowId,
        tab: TabId,
        profile: &Arc<ContentProfile>,
    ) -> Result<Box<dyn ContentSurface>, BrowserError> {
        let native = self
            .natives
            .get_mut(window)
            .ok_or(BrowserError::UnknownWindow(window))?;
        let (width, height) = native.logical_size();

        let handle = self
            .webviews
            .create_content(&*native.window, tab, content_bounds(width, height), profile)
            .map_err(|e| BrowserError::Surface(e.to_string()))?;
        native.surfaces.push(handle.downgrade());
        Ok(Box::new(handle))
    }

    fn close_window(&mut self, id: WindowId) {
        if self.natives.remove(id).is_some() {
            tracing::info!(window = %id, "native window closed");
        }
    }
}
