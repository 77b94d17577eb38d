//! Durable key-value storage for selection state
//!
//! Storage only bootstraps the next session: in-memory state is the source
//! of truth and every write happens after the state change it mirrors. The
//! trait is synchronous; implementations must not block meaningfully.
//!
//! The two selection scopes use fixed, distinct keys, so the stores never
//! contend for the same entry.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

/// Storage key for the current organization id
pub const CURRENT_ORGANIZATION_KEY: &str = "current_organization_id";

/// Storage key for the current team id
pub const CURRENT_TEAM_KEY: &str = "current_team_id";

/// Durable client-side key-value storage
pub trait SelectionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Volatile storage for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Write-through storage backed by a JSON object file.
///
/// The file is read once at open; every mutation rewrites it. Write
/// failures are logged and absorbed; losing the bootstrap cache must not
/// break the running session.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open storage at `path`, loading existing entries if the file exists.
    ///
    /// A missing file is an empty store; a corrupt file is replaced on the
    /// next write (its previous content is logged and dropped).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "Discarding unreadable selection storage file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(path = %parent.display(), %err, "Failed to create storage directory");
                    return;
                }
            }
        }

        match serde_json::to_string_pretty(entries) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), %err, "Failed to write selection storage");
                }
            }
            Err(err) => {
                warn!(%err, "Failed to serialize selection storage");
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}
