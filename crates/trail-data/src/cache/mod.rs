//! TTL-based key/value cache with pluggable persistence
//!
//! Caching is best-effort throughout: a failed write is logged and
//! swallowed, and an expired or undecodable entry is treated as a miss
//! and removed on the read path (lazy eviction, no background sweep).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Storage backend for serialized cache entries. Keys are caller-supplied
/// strings; the store is content-agnostic.
pub trait CacheStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), DataError>;
    fn remove(&self, key: &str);
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<AHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DataError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// File-backed store holding one JSON file per key, so cached responses
/// survive process restarts.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> FileStore {
        FileStore { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl CacheStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DataError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}

/// Payload wrapper persisted by the cache.
#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    timestamp: DateTime<Utc>,
}

/// TTL cache over an arbitrary [`CacheStore`].
#[derive(Clone)]
pub struct TtlCache {
    store: Arc<dyn CacheStore>,
    ttl: chrono::Duration,
}

impl TtlCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> TtlCache {
        TtlCache {
            store,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(1)),
        }
    }

    pub fn in_memory(ttl: Duration) -> TtlCache {
        TtlCache::new(Arc::new(MemoryStore::new()), ttl)
    }

    /// Look up a cached value. A stored-but-expired or undecodable entry
    /// is removed and reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.read(key)?;
        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(key, %err, "dropping undecodable cache entry");
                self.store.remove(key);
                return None;
            }
        };

        if Utc::now() - entry.timestamp > self.ttl {
            tracing::debug!(key, "cache entry expired");
            self.store.remove(key);
            return None;
        }

        Some(entry.data)
    }

    /// Store a value. Failures are logged and swallowed; the caller must
    /// keep functioning with no cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let entry = CacheEntry {
            data: value,
            timestamp: Utc::now(),
        };
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, %err, "failed to serialize cache entry");
                return;
            }
        };
        if let Err(err) = self.store.write(key, &raw) {
            tracing::warn!(key, %err, "cache write failed");
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.store.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cache = TtlCache::in_memory(Duration::from_secs(3600));
        cache.set("k", &vec![1u32, 2, 3]);
        assert_eq!(cache.get::<Vec<u32>>("k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_a_miss() {
        let cache = TtlCache::in_memory(Duration::from_secs(3600));
        assert_eq!(cache.get::<String>("nope"), None);
    }

    #[test]
    fn test_expired_entry_is_removed_on_read() {
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(store.clone(), Duration::from_secs(60));

        // Plant an entry stamped well past the TTL.
        let stale = serde_json::json!({
            "data": "old",
            "timestamp": Utc::now() - chrono::Duration::hours(2),
        });
        store.write("k", &stale.to_string()).unwrap();

        assert_eq!(cache.get::<String>("k"), None);
        assert!(store.read("k").is_none(), "expired entry must be evicted");

        // A later set behaves as if no prior entry existed.
        cache.set("k", &"new".to_string());
        assert_eq!(cache.get::<String>("k"), Some("new".to_string()));
    }

    #[test]
    fn test_undecodable_entry_is_removed() {
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(store.clone(), Duration::from_secs(60));
        store.write("k", "not json at all").unwrap();
        assert_eq!(cache.get::<String>("k"), None);
        assert!(store.read("k").is_none());
    }

    #[test]
    fn test_invalidate() {
        let cache = TtlCache::in_memory(Duration::from_secs(3600));
        cache.set("k", &1u8);
        cache.invalidate("k");
        assert_eq!(cache.get::<u8>("k"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("trailhead-cache-test-{}", std::process::id()));
        let store = FileStore::new(dir.clone());

        store.write("trails:page-0", "payload").unwrap();
        assert_eq!(store.read("trails:page-0").as_deref(), Some("payload"));
        // Key characters outside [a-z0-9-_] are sanitized into the same
        // filename, still a hit for the same key.
        store.remove("trails:page-0");
        assert!(store.read("trails:page-0").is_none());

        let _ = std::fs::remove_dir_all(dir);
    }
}
