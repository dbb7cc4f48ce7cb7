//! Internal types and constants for the app module.

use std::time::Duration;

/// How often to poll WebView events and job completions (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Internal page hosting each window's toolbar.
pub(super) const TOOLBAR_PAGE: &str = "toolbar.html";

pub(super) const TOOLBAR_HTML: &str = include_str!("../../assets/toolbar.html");
