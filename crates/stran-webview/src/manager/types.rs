use stran_common::NewContextKind;

/// Options shared by every WebView the manager creates.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
    /// Initial routing of `target=_blank` links and `window.open` calls.
    pub new_window_kind: NewContextKind,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            user_agent: None,
            clipboard: true,
            autoplay: false,
            new_window_kind: NewContextKind::Tab,
        }
    }
}

impl WebViewConfig {
    pub fn with_new_window_kind(mut self, kind: NewContextKind) -> Self {
        self.new_window_kind = kind;
        self
    }
}
