mod app;
mod cli;
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use stran_common::ConfigError;
use stran_config::schema::StranConfig;
use winit::event_loop::EventLoop;

/// Resolve and load the config file, falling back to defaults.
fn load_config(
    override_path: Option<&PathBuf>,
) -> (StranConfig, Option<PathBuf>, Option<ConfigError>) {
    let path = match override_path {
        Some(p) => Ok(p.clone()),
        None => stran_config::toml_loader::default_config_path(),
    };
    let result = match override_path {
        Some(p) => stran_config::load_config_from(p),
        None => stran_config::load_config(),
    };
    match result {
        Ok(config) => (config, path.ok(), None),
        Err(e) => (StranConfig::default(), path.ok(), Some(e)),
    }
}

fn main() {
    let args = cli::parse();

    let (config, config_path, config_error) = load_config(args.config.as_ref());

    logging::init(&logging::directive(
        args.log_level.as_deref(),
        config.logging.level,
    ));

    tracing::info!("S-Tran v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    if let Some(ref path) = config_path {
        tracing::info!(path = %path.display(), "Config file");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("stran-worker")
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return;
        }
    };

    let mut app = match app::StranApp::new(config, config_path, args.url, runtime.handle().clone())
    {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to initialize: {e}");
            return;
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    drop(app);

    runtime.shutdown_timeout(Duration::from_secs(2));
    tracing::info!("Shutdown complete");
}
