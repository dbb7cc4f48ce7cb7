//! Change notifications for the config file.
//!
//! The parent directory is watched rather than the file, because editors
//! that save by write-then-rename replace the inode. Bursts of events are
//! collapsed into one signal after a 500ms quiet period.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use stran_common::ConfigError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Signals when one config file has been created or modified.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "config file absent, waiting for it to appear");
        }
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Send `()` on `tx` after each settled burst of changes.
    ///
    /// Returns once the underlying notifier shuts down.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = self.path.file_name().map(OsStr::to_os_string).unwrap_or_default();

        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);
        let mut notifier = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if touches(&event, &name) => {
                    let _ = raw_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "file notification error"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("cannot start file notifier: {e}")))?;

        notifier
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("cannot watch {}: {e}", dir.display())))?;
        info!(path = %self.path.display(), "watching config file");

        while raw_rx.recv().await.is_some() {
            if !settle(&mut raw_rx).await {
                break;
            }
            debug!("config file settled after change");
            let _ = tx.send(());
        }

        drop(notifier);
        Ok(())
    }
}

/// Whether `event` created or modified the file called `name`.
fn touches(event: &Event, name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p.file_name() == Some(name.as_os_str()))
}

/// Swallow events until none arrive for [`QUIET_PERIOD`].
/// Returns `false` if the channel closed meanwhile.
async fn settle(rx: &mut mpsc::Receiver<()>) -> bool {
    loop {
        match tokio::time::timeout(QUIET_PERIOD, rx.recv()).await {
            Err(_) => return true,
            Ok(Some(())) => continue,
            Ok(None) => return false,
        }
    }
}
