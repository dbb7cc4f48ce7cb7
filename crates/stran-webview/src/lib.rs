//! wry-backed content surfaces for S-Tran.
//!
//! Wraps the `wry` crate to provide:
//! - One child WebView per tab, implementing `ContentSurface`
//! - A per-window toolbar WebView
//! - Bidirectional IPC (Rust <-> JavaScript)
//! - The injected page scripts, including the `translator` bridge object
//! - Navigation allowlist and back/forward tracking
//! - Internal pages served over the `stran://` scheme

pub mod events;
pub mod history;
pub mod ipc;
pub mod layout;
pub mod manager;
pub mod pages;
pub mod scripts;

pub use events::{PageLoadState, WebViewEvent};
pub use history::NavigationHistory;
pub use ipc::{ContentRequest, IpcMessage, IpcPayload};
pub use manager::{ToolbarHandle, WebViewConfig, WebViewHandle, WebViewManager};
pub use pages::{page_url, InternalPages};
pub use scripts::content_scripts;
