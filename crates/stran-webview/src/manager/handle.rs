use std::rc::{Rc, Weak};

use stran_browser::ContentSurface;
use stran_common::{NavAction, TabId, WindowId};
use stran_translate::{translation_state_detail, TRANSLATION_STATE_EVENT};
use tracing::warn;
use wry::WebView;

use crate::ipc::{js_custom_event, js_dispatch_message};

/// A tab's content WebView. Dropping it destroys the native view; other
/// holders only get a [`Weak`] reference for layout.
pub struct WebViewHandle {
    webview: Rc<WebView>,
    tab: TabId,
}

impl WebViewHandle {
    pub(super) fn new(webview: WebView, tab: TabId) -> Self {
        Self {
            webview: Rc::new(webview),
            tab,
        }
    }

    /// A reference that does not keep the view alive.
    pub fn downgrade(&self) -> Weak<WebView> {
        Rc::downgrade(&self.webview)
    }

    fn eval(&self, what: &str, js: &str) {
        if let Err(e) = self.webview.evaluate_script(js) {
            warn!(tab = %self.tab, what, error = %e, "script evaluation failed");
        }
    }
}

impl ContentSurface for WebViewHandle {
    fn load_url(&mut self, url: &str) {
        if let Err(e) = self.webview.load_url(url) {
            warn!(tab = %self.tab, url, error = %e, "load failed");
        }
    }

    fn trigger_action(&mut self, action: NavAction) {
        let js = match action {
            NavAction::Back => "history.back();",
            NavAction::Forward => "history.forward();",
            NavAction::Reload => "location.reload();",
        };
        self.eval("navigation", js);
    }

    fn notify_translation_state(&mut self, enabled: bool) {
        let js = js_custom_event(TRANSLATION_STATE_EVENT, &translation_state_detail(enabled));
        self.eval("translation state", &js);
    }

    fn deliver_translation(&mut self, payload: &str) {
        let js = js_dispatch_message(
            "translation_complete",
            &serde_json::Value::String(payload.to_string()),
        );
        self.eval("translation result", &js);
    }

    fn send_bridge_reply(&mut self, call: u64, payload: &str) {
        let js = js_dispatch_message(
            "bridge_reply",
            &serde_json::json!({ "call": call, "payload": payload }),
        );
        self.eval("bridge reply", &js);
    }

    fn set_visible(&mut self, visible: bool) {
        if let Err(e) = self.webview.set_visible(visible) {
            warn!(tab = %self.tab, visible, error = %e, "visibility change failed");
        }
        if visible {
            if let Err(e) = self.webview.focus() {
                warn!(tab = %self.tab, error = %e, "focus failed");
            }
        }
    }
}

/// A window's toolbar WebView.
pub struct ToolbarHandle {
    webview: WebView,
    window: WindowId,
}

impl ToolbarHandle {
    pub(super) fn new(webview: WebView, window: WindowId) -> Self {
        Self { webview, window }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Send a typed IPC message to the toolbar script.
    pub fn send_ipc(&self, kind: &str, payload: &serde_json::Value) {
        let script = js_dispatch_message(kind, payload);
        if let Err(e) = self.webview.evaluate_script(&script) {
            warn!(window = %self.window, kind, error = %e, "toolbar update failed");
        }
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }
}
