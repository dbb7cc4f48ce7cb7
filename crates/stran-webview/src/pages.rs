//! In-memory pages served over the `stran://` custom protocol.
//!
//! The toolbar and other browser-owned pages are compiled into the binary
//! and registered here, so no local HTTP server or asset directory is
//! needed. `stran://localhost/toolbar.html` resolves to the `toolbar.html`
//! entry.

use std::borrow::Cow;
use std::collections::HashMap;

pub const SCHEME: &str = "stran";

#[derive(Debug, Clone, Default)]
pub struct InternalPages {
    pages: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl InternalPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page under `path` (leading slashes are ignored).
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        let path = path.into();
        self.pages.insert(
            path.trim_start_matches('/').to_string(),
            (mime.into(), data.into()),
        );
    }

    pub fn insert_html(&mut self, path: impl Into<String>, html: &str) {
        self.insert(path, "text/html", html.as_bytes());
    }

    /// Look up a page by its request URI.
    pub fn resolve(&self, uri: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let path = request_path(uri);
        self.pages
            .get(path)
            .map(|(mime, data)| (Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Full URL of an internal page, as loaded into a WebView.
pub fn page_url(path: &str) -> String {
    format!("{SCHEME}://localhost/{}", path.trim_start_matches('/'))
}

/// Strip the scheme and host from a custom-protocol URI.
///
/// WebView2 on Windows rewrites `stran://localhost/x` to
/// `http://stran.localhost/x`, so both forms are accepted.
fn request_path(uri: &str) -> &str {
    let rest = uri
        .strip_prefix("stran://localhost")
        .or_else(|| uri.strip_prefix("http://stran.localhost"))
        .or_else(|| uri.strip_prefix("https://stran.localhost"))
        .or_else(|| uri.strip_prefix("stran://"))
        .unwrap_or(uri);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    rest.trim_start_matches('/')
}
