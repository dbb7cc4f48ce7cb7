use std::borrow::Cow;
use std::sync::Arc;

use stran_browser::ContentProfile;
use stran_common::{TabId, WindowId};
use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::ipc::IPC_INIT_SCRIPT;
use crate::pages::{InternalPages, SCHEME};

use super::handle::{ToolbarHandle, WebViewHandle};
use super::WebViewManager;

impl WebViewManager {
    /// Create the content WebView of `tab` as a child of `window`.
    ///
    /// The profile's script bundle is installed at document start of every
    /// page. The surface starts hidden on `about:blank`.
    pub fn create_content<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        tab: TabId,
        bounds: wry::Rect,
        profile: &ContentProfile,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = Arc::clone(&self.events);

        let mut builder = self
            .base_builder(bounds)
            .with_visible(false)
            .with_initialization_script(&profile.bundle())
            .with_url("about:blank");

        builder = Self::attach_content_ipc_handler(builder, Arc::clone(&events), tab);
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events), tab);
        builder = Self::attach_title_handler(builder, Arc::clone(&events), tab);
        builder = Self::attach_navigation_handler(builder, tab);
        builder = Self::attach_new_window_handler(
            builder,
            Arc::clone(&events),
            tab,
            Arc::clone(&self.new_window_kind),
        );
        builder = self.attach_custom_protocol(builder);

        let webview = builder.build_as_child(window)?;
        debug!(%tab, profile = profile.name(), "content WebView created");

        Ok(WebViewHandle::new(webview, tab))
    }

    /// Create the toolbar WebView of `window`, showing the internal page at `url`.
    pub fn create_toolbar<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        window_id: WindowId,
        bounds: wry::Rect,
        url: &str,
    ) -> Result<ToolbarHandle, wry::Error> {
        let mut builder = self
            .base_builder(bounds)
            .with_initialization_script(IPC_INIT_SCRIPT)
            .with_url(url);

        builder = Self::attach_toolbar_ipc_handler(builder, Arc::clone(&self.events), window_id);
        builder = Self::attach_toolbar_navigation_handler(builder, window_id);
        builder = self.attach_custom_protocol(builder);

        let webview = builder.build_as_child(window)?;
        debug!(%window_id, url, "toolbar WebView created");

        Ok(ToolbarHandle::new(webview, window_id))
    }

    fn base_builder<'a>(&self, bounds: wry::Rect) -> WebViewBuilder<'a> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(self.config.devtools)
            .with_clipboard(self.config.clipboard)
            .with_autoplay(self.config.autoplay)
            .with_focused(false);
        if let Some(ua) = &self.config.user_agent {
            builder = builder.with_user_agent(ua);
        }
        builder
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let pages = Arc::clone(&self.pages);
        builder.with_custom_protocol(SCHEME.to_string(), move |_wv_id, request| {
            serve_page(&pages, &request.uri().to_string())
        })
    }
}

fn serve_page(pages: &InternalPages, uri: &str) -> wry::http::Response<Cow<'static, [u8]>> {
    let response = match pages.resolve(uri) {
        Some((mime, data)) => wry::http::Response::builder()
            .status(200)
            .header("Content-Type", mime.as_ref())
            .body(Cow::from(data.into_owned())),
        None => {
            warn!(uri, "custom protocol: page not found");
            wry::http::Response::builder()
                .status(404)
                .body(Cow::from(b"Not Found".to_vec()))
        }
    };
    response.unwrap_or_else(|e| {
        warn!(error = %e, "custom protocol: invalid response");
        let mut fallback = wry::http::Response::new(Cow::from(Vec::new()));
        *fallback.status_mut() = wry::http::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}
