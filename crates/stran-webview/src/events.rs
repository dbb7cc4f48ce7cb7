//! WebView event types.

use serde::{Deserialize, Serialize};
use stran_common::{SurfaceEvent, TabId, WindowId};

use crate::ipc::IpcMessage;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events pushed from WebView callbacks for the event loop to consume.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// A tab's content surface changed state.
    Surface { tab: TabId, event: SurfaceEvent },
    /// Page script called `translator.translate(text)`; answer `call`.
    BridgeCall { tab: TabId, call: u64, text: String },
    /// A message from a window's toolbar.
    Toolbar { window: WindowId, message: IpcMessage },
}
