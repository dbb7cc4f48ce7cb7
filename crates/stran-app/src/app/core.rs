//! StranApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use stran_browser::{Session, SessionOptions};
use stran_common::{NotificationQueue, StranError};
use stran_config::schema::StranConfig;
use stran_config::SharedSettings;
use stran_translate::{JobDispatcher, OpenAiClient, OpenAiConfig};
use stran_webview::{content_scripts, InternalPages, WebViewConfig, WebViewManager};
use tokio::runtime::Handle;
use tokio::sync::watch;

use super::engine::NativeWindows;
use super::types::{TOOLBAR_HTML, TOOLBAR_PAGE};

/// Top-level application state.
pub struct StranApp {
    pub(super) config: StranConfig,
    pub(super) config_path: Option<PathBuf>,
    pub(super) config_rx: Option<watch::Receiver<StranConfig>>,
    pub(super) settings: Arc<SharedSettings>,
    pub(super) notifications: NotificationQueue,

    // Browsing state and the native objects behind it
    pub(super) session: Session,
    pub(super) natives: NativeWindows,
    pub(super) webviews: WebViewManager,

    // Translation
    pub(super) dispatcher: JobDispatcher,

    /// Page for the first window, from the command line.
    pub(super) initial_url: Option<String>,
    pub(super) started: bool,
    pub(super) should_exit: bool,
    /// Set when chrome or notifications changed and toolbars need a refresh.
    pub(super) chrome_dirty: bool,
    pub(super) last_poll: Instant,
}

impl StranApp {
    pub fn new(
        config: StranConfig,
        config_path: Option<PathBuf>,
        initial_url: Option<String>,
        runtime: Handle,
    ) -> Result<Self, StranError> {
        let settings = Arc::new(SharedSettings::new(config.translator.clone()));

        let client = OpenAiClient::new(OpenAiConfig::from_translator(&config.translator))
            .map_err(|e| StranError::Translate(e.to_string()))?;
        let dispatcher = JobDispatcher::new(
            Arc::new(client),
            Arc::clone(&settings) as Arc<dyn stran_config::SettingsProvider>,
            runtime.clone(),
        )
        .with_timeout(Duration::from_secs(config.translator.timeout_secs));

        let config_rx = config_path.as_ref().map(|path| {
            let _guard = runtime.enter();
            stran_config::ReloadManager::spawn(path.clone(), config.clone())
        });

        let mut pages = InternalPages::new();
        pages.insert_html(TOOLBAR_PAGE, TOOLBAR_HTML);
        let webviews = WebViewManager::new(
            WebViewConfig::default().with_new_window_kind(config.browser.new_window_target.into()),
            pages,
        );

        let session = Session::new(SessionOptions::from_config(&config, content_scripts()));

        Ok(Self {
            config,
            config_path,
            config_rx,
            settings,
            notifications: NotificationQueue::default(),
            session,
            natives: NativeWindows::default(),
            webviews,
            dispatcher,
            initial_url,
            started: false,
            should_exit: false,
            chrome_dirty: false,
            last_poll: Instant::now(),
        })
    }
}
