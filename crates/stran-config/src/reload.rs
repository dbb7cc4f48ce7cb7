//! Follows the config file while the browser runs.
//!
//! Each change signalled by [`ConfigWatcher`] is re-read and validated.
//! Only a config that passes validation replaces the published one, so a
//! half-edited file never reaches the translator.

use std::path::{Path, PathBuf};

use stran_common::ConfigError;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::schema::StranConfig;
use crate::watcher::ConfigWatcher;
use crate::{toml_loader, validation};

/// Publishes every accepted revision of one config file.
pub struct ReloadManager {
    path: PathBuf,
    published: watch::Sender<StranConfig>,
}

impl ReloadManager {
    /// Spawn the reload task on the current runtime.
    ///
    /// `current` is what the caller already loaded; it is the receiver's
    /// value until the first accepted change.
    pub fn spawn(path: PathBuf, current: StranConfig) -> watch::Receiver<StranConfig> {
        let (published, rx) = watch::channel(current);
        let manager = ReloadManager { path, published };
        tokio::spawn(manager.run());
        rx
    }

    async fn run(self) {
        let (change_tx, mut changes) = broadcast::channel(16);
        let watcher = ConfigWatcher::new(self.path.clone());
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                warn!(error = %e, "config watcher stopped");
            }
        });

        loop {
            match changes.recv().await {
                Ok(()) => {
                    if !self.reload() {
                        debug!("config receivers gone, reload task exiting");
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "coalescing missed config changes");
                    if !self.reload() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    /// Returns `false` once nobody listens anymore.
    fn reload(&self) -> bool {
        match read_valid(&self.path) {
            Ok(config) => {
                info!(path = %self.path.display(), "config reloaded");
                self.published.send(config).is_ok()
            }
            Err(e) => {
                warn!(error = %e, "config change rejected, keeping previous settings");
                !self.published.is_closed()
            }
        }
    }
}

/// Read `path` and accept it only if it validates.
fn read_valid(path: &Path) -> Result<StranConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
