use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use tracing::warn;

pub const KEY_TOKEN: &str = "auth_token";
pub const KEY_USER_ID: &str = "auth_user_id";
pub const KEY_USER_EMAIL: &str = "auth_user_email";
pub const KEY_ROLES: &str = "auth_roles";

/// Every key the session layer persists, cleared as a set on sign-out.
pub const SESSION_KEYS: &[&str] = &[KEY_TOKEN, KEY_USER_ID, KEY_USER_EMAIL, KEY_ROLES];

/// Durable key-value port the session store writes through.
///
/// The store computes the next session state and then invokes this port, so
/// the transition logic stays unit-testable against [`MemoryStorage`].
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Thread-safe in-memory storage, used by tests and short-lived sessions.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        let guard = self.inner.read().expect("rwlock poisoned");
        guard.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let guard = self.inner.read().expect("rwlock poisoned");
        guard.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut guard = self.inner.write().expect("rwlock poisoned");
        guard.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        let mut guard = self.inner.write().expect("rwlock poisoned");
        guard.remove(key);
    }
}

/// Write-through storage backed by a single JSON file, the durable analog of
/// a browser tab's session storage.
pub struct JsonFileStorage {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open (or create) the backing file and load any persisted entries.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read session file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("session file {} is not valid JSON", path.display()))?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialize session entries");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, raw) {
            warn!(error = %err, path = %self.path.display(), "failed to persist session entries");
        }
    }
}

impl SessionStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let guard = self.cache.read().expect("rwlock poisoned");
        guard.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut guard = self.cache.write().expect("rwlock poisoned");
        guard.insert(key.to_owned(), value.to_owned());
        self.flush(&guard);
    }

    fn remove(&self, key: &str) {
        let mut guard = self.cache.write().expect("rwlock poisoned");
        guard.remove(key);
        self.flush(&guard);
    }
}
