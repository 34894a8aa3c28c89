//! Configuration file watcher for hot reload.
//!
//! # Responsibilities
//! - Notice edits to the config file, including editors that save by
//!   writing a sibling file and renaming it over the original
//! - Coalesce a burst of file events into a single reload
//! - Deliver only configs that load and validate
//!
//! The parent directory is watched rather than the file itself, so the watch
//! survives the file being replaced.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ExtraHeadersConfig;

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches one configuration file and streams re-loaded configs.
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
}

impl ConfigWatcher {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Quiet period required after the last file event before reloading.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching. Must be called inside a tokio runtime.
    ///
    /// Returns the watcher guard and a receiver of re-loaded configs, suitable
    /// for [`HeaderInstaller::run`](crate::config::HeaderInstaller::run).
    /// Dropping the guard stops the watch and closes the receiver.
    pub fn spawn(
        self,
    ) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<ExtraHeadersConfig>), notify::Error>
    {
        let file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| notify::Error::path_not_found().add_path(self.path.clone()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_file(&event, &file_name) => {
                    let _ = signal_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tokio::spawn(reload_on_signal(self.path.clone(), self.debounce, signal_rx, update_tx));

        tracing::info!(path = ?self.path, debounce = ?self.debounce, "Config watcher started");
        Ok((watcher, update_rx))
    }
}

fn touches_file(event: &Event, file_name: &OsString) -> bool {
    !event.kind.is_access()
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

async fn reload_on_signal(
    path: PathBuf,
    debounce: Duration,
    mut signals: mpsc::UnboundedReceiver<()>,
    updates: mpsc::UnboundedSender<ExtraHeadersConfig>,
) {
    while signals.recv().await.is_some() {
        // Wait for the writer to go quiet.
        loop {
            match tokio::time::timeout(debounce, signals.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        tracing::info!(path = ?path, "Config file change detected, reloading");
        match load_config(&path) {
            Ok(config) => {
                if updates.send(config).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to reload config: {}. Keeping current configuration.", e);
            }
        }
    }
}
