use std::sync::{Arc, Mutex};

use stran_common::{NewContextKind, SurfaceEvent, TabId, WindowId};
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};
use crate::history::NavigationHistory;
use crate::ipc::{ContentRequest, IpcMessage};

use super::{current_kind, push, WebViewManager};

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// URL prefixes a content WebView may navigate to. Everything else
/// (`javascript:`, `ftp:`, unknown custom schemes) is blocked.
///
/// - `stran://` and its WebView2 rewrite serve internal pages
/// - `file://` and `data:` are reachable only by typing them in the address bar
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "http://",
    "https://",
    "about:",
    "stran://",
    "file://",
    "data:",
];

/// The toolbar only ever shows internal pages.
pub const TOOLBAR_NAV_PREFIXES: &[&str] = &["stran://", "http://stran.localhost", "about:blank"];

pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

pub fn is_toolbar_navigation_allowed(url: &str) -> bool {
    TOOLBAR_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// EVENT TRANSLATION
// =============================================================================

/// Map an IPC body posted by a content page to an event.
pub(crate) fn content_ipc_event(tab: TabId, body: &str) -> Option<WebViewEvent> {
    let msg = IpcMessage::from_json(body)?;
    match ContentRequest::from_message(&msg)? {
        ContentRequest::Translate { call, text } => {
            Some(WebViewEvent::BridgeCall { tab, call, text })
        }
        ContentRequest::Close => Some(WebViewEvent::Surface {
            tab,
            event: SurfaceEvent::CloseRequested,
        }),
    }
}

/// Map a page-load callback to events, updating the tab's history.
pub(crate) fn page_load_events(
    tab: TabId,
    history: &mut NavigationHistory,
    state: PageLoadState,
    url: String,
) -> Vec<WebViewEvent> {
    let surface = |event| WebViewEvent::Surface { tab, event };
    match state {
        PageLoadState::Started => {
            let mut events: Vec<_> = history.record(&url).into_iter().map(surface).collect();
            events.insert(0, surface(SurfaceEvent::UrlChanged(url)));
            events
        }
        PageLoadState::Finished => vec![surface(SurfaceEvent::LoadFinished)],
    }
}

/// A new-context request for `url`, routed by the kind configured now.
/// Blocked URLs yield nothing.
pub(crate) fn new_window_event(
    tab: TabId,
    url: String,
    kind: &Mutex<NewContextKind>,
) -> Option<WebViewEvent> {
    if !is_navigation_allowed(&url) {
        warn!(%tab, url = %url, "new window blocked: URL not in allowlist");
        return None;
    }
    let kind = current_kind(kind);
    debug!(%tab, url = %url, ?kind, "new context requested");
    Some(WebViewEvent::Surface {
        tab,
        event: SurfaceEvent::NewContextRequested { kind, url },
    })
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_content_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        tab: TabId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body();
            match content_ipc_event(tab, body) {
                Some(event) => {
                    debug!(%tab, body_len = body.len(), "IPC message from page");
                    push(&events, event);
                }
                None => warn!(%tab, body_len = body.len(), "IPC message rejected"),
            }
        })
    }

    pub(super) fn attach_toolbar_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        window: WindowId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body();
            let Some(message) = IpcMessage::from_json(body) else {
                warn!(%window, body_len = body.len(), "toolbar IPC rejected: invalid JSON");
                return;
            };
            debug!(%window, kind = %message.kind, "toolbar IPC");
            push(&events, WebViewEvent::Toolbar { window, message });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        tab: TabId,
    ) -> WebViewBuilder<'a> {
        let history = Mutex::new(NavigationHistory::new());
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(%tab, ?state, url = %url, "page load");
            let Ok(mut history) = history.lock() else {
                return;
            };
            for e in page_load_events(tab, &mut history, state, url) {
                push(&events, e);
            }
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        tab: TabId,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(%tab, title = %title, "title changed");
            push(
                &events,
                WebViewEvent::Surface {
                    tab,
                    event: SurfaceEvent::TitleChanged(title),
                },
            );
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        tab: TabId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url) {
                warn!(%tab, url = %url, "navigation blocked: URL not in allowlist");
                return false;
            }
            true
        })
    }

    /// Pages never get a native popup: the request becomes a
    /// `NewContextRequested` event and the session decides where it opens.
    pub(super) fn attach_new_window_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        tab: TabId,
        kind: Arc<Mutex<NewContextKind>>,
    ) -> WebViewBuilder<'a> {
        builder.with_new_window_req_handler(move |url| {
            if let Some(event) = new_window_event(tab, url, &kind) {
                push(&events, event);
            }
            false
        })
    }

    pub(super) fn attach_toolbar_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        window: WindowId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            let allowed = is_toolbar_navigation_allowed(&url);
            if !allowed {
                warn!(%window, url = %url, "toolbar navigation blocked");
            }
            allowed
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
