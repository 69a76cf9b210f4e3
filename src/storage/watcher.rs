use crate::core::traits::StorageBackend;
use crate::storage::backend::FileBackend;
use crate::storage::store::StorageEvent;
use crate::utils::error::{AppError, AppResult};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Watches a data directory for writes made by other processes.
///
/// A background thread turns file system notifications into
/// [`StorageEvent`]s. It only reads files and forwards messages; the owner
/// decides when to apply them.
pub struct StorageWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<StorageEvent>,
}

impl StorageWatcher {
    pub fn start(dir: &Path, debounce: Duration) -> AppResult<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(format!("Failed to create data directory {}: {}", dir.display(), e))
        })?;

        let (raw_tx, raw_rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    if raw_tx.send(event).is_err() {
                        log::debug!("Dropping file event, forwarder has stopped");
                    }
                }
                Err(e) => log::warn!("File watcher error: {}", e),
            }
        })
        .map_err(|e| AppError::System(format!("Watcher init error: {}", e)))?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| AppError::System(format!("Watch error: {}", e)))?;

        let (tx, events) = mpsc::channel();
        let backend = FileBackend::new(dir);
        std::thread::spawn(move || forward_events(raw_rx, tx, backend, debounce));

        log::debug!("Watching {} for external changes", dir.display());
        Ok(Self {
            _watcher: watcher,
            events,
        })
    }

    /// Next pending event, without blocking
    pub fn try_next(&self) -> Option<StorageEvent> {
        self.events.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn next_timeout(&self, timeout: Duration) -> Option<StorageEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

/// Collapse bursts of notifications per key, then read each touched key once
fn forward_events(
    raw_rx: Receiver<notify::Event>,
    tx: mpsc::Sender<StorageEvent>,
    backend: FileBackend,
    debounce: Duration,
) {
    loop {
        let first = match raw_rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };

        let mut touched = BTreeSet::new();
        collect_keys(&first, &mut touched);

        let deadline = Instant::now() + debounce;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match raw_rx.recv_timeout(remaining) {
                Ok(event) => collect_keys(&event, &mut touched),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        for key in touched {
            let new_value = match backend.get_item(&key) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Failed to read changed key '{}': {}", key, e);
                    continue;
                }
            };
            if tx.send(StorageEvent { key, new_value }).is_err() {
                return;
            }
        }
    }
}

fn collect_keys(event: &notify::Event, touched: &mut BTreeSet<String>) {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return;
    }
    touched.extend(event.paths.iter().filter_map(|p| FileBackend::key_for(p)));
}
