//! Durable snapshot of persisted cooldowns.
//!
//! The snapshot is a JSON object mapping keys to expiry Unix seconds:
//!
//! ```json
//! {
//!   "ping:545154148069408768": 1700000011
//! }
//! ```
//!
//! Mutations are buffered and written by a single deferred flush, so a burst
//! of `set` calls costs one file write. The file is replaced atomically and
//! deleted once no persisted key remains.

use crate::error::PersistenceError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Snapshot contents: key to expiry in Unix seconds
pub type SnapshotEntries = BTreeMap<String, i64>;

#[derive(Debug, Default)]
struct PendingWrites {
    changes: BTreeMap<String, Option<i64>>,
    clear: bool,
    flush_scheduled: bool,
}

impl PendingWrites {
    fn is_empty(&self) -> bool {
        self.changes.is_empty() && !self.clear
    }
}

#[derive(Debug)]
struct SnapshotInner {
    path: PathBuf,
    flush_delay: Duration,
    pending: Mutex<PendingWrites>,
    write_lock: Mutex<()>,
}

/// Handle to the snapshot file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: Arc<SnapshotInner>,
}

impl SnapshotStore {
    /// Snapshot at `path`, flushing buffered changes `flush_delay` after the first one.
    pub fn new(path: impl Into<PathBuf>, flush_delay: Duration) -> Self {
        Self {
            inner: Arc::new(SnapshotInner {
                path: path.into(),
                flush_delay,
                pending: Mutex::new(PendingWrites::default()),
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Record `key` with its expiry
    pub fn write(&self, key: &str, expires_at: i64) {
        self.buffer(|pending| {
            pending.changes.insert(key.to_string(), Some(expires_at));
        });
    }

    /// Drop `key` from the snapshot
    pub fn remove(&self, key: &str) {
        self.buffer(|pending| {
            pending.changes.insert(key.to_string(), None);
        });
    }

    /// Drop every key from the snapshot
    pub fn remove_all(&self) {
        self.buffer(|pending| {
            pending.changes.clear();
            pending.clear = true;
        });
    }

    /// Whether buffered changes are waiting for a flush
    pub fn has_pending(&self) -> bool {
        !self.inner.pending.lock().is_empty()
    }

    /// Read the snapshot. An absent, unreadable or corrupt file reads as empty.
    pub fn load_all(&self) -> SnapshotEntries {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                error!("Ignoring cooldown snapshot: {}", e);
                SnapshotEntries::new()
            }
        }
    }

    /// Read the snapshot, reporting why it could not be read.
    pub fn try_load(&self) -> Result<SnapshotEntries, PersistenceError> {
        let path = self.path();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SnapshotEntries::new()),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| PersistenceError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply buffered changes to the file now.
    pub fn flush(&self) -> Result<(), PersistenceError> {
        let _writer = self.inner.write_lock.lock();

        let (changes, clear) = {
            let mut pending = self.inner.pending.lock();
            pending.flush_scheduled = false;
            if pending.is_empty() {
                return Ok(());
            }
            let clear = std::mem::take(&mut pending.clear);
            (std::mem::take(&mut pending.changes), clear)
        };

        let mut entries = if clear {
            SnapshotEntries::new()
        } else {
            self.load_all()
        };

        for (key, change) in changes {
            match change {
                Some(expires_at) => {
                    entries.insert(key, expires_at);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }

        if entries.is_empty() {
            self.delete_file()
        } else {
            self.replace_file(&entries)
        }
    }

    fn buffer(&self, apply: impl FnOnce(&mut PendingWrites)) {
        let mut pending = self.inner.pending.lock();
        apply(&mut pending);

        if pending.flush_scheduled {
            return;
        }
        pending.flush_scheduled = true;

        let store = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(store.inner.flush_delay).await;
            // File I/O runs on the blocking pool so timers keep firing.
            match tokio::task::spawn_blocking(move || store.flush()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Failed to flush cooldown snapshot: {}", e),
                Err(e) => error!("Cooldown snapshot flush task failed: {}", e),
            }
        });
    }

    fn replace_file(&self, entries: &SnapshotEntries) -> Result<(), PersistenceError> {
        let path = self.path();
        let io_error = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(PersistenceError::Serialize)?;
        let temp_path = temp_path_for(path);
        fs::write(&temp_path, json).map_err(io_error)?;
        fs::rename(&temp_path, path).map_err(io_error)?;

        debug!(entries = entries.len(), path = %path.display(), "Cooldown snapshot written");
        Ok(())
    }

    fn delete_file(&self) -> Result<(), PersistenceError> {
        let path = self.path();
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Cooldown snapshot removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => {
                warn!("Could not remove cooldown snapshot {}: {}", path.display(), source);
                Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
