//! Process-local store.

use super::KvStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory [`KvStore`] that also counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Number of `set` calls that reached the map.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AppError {
    AppError::StoreUnavailable("memory store lock poisoned".to_string())
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::KvStore;

    #[tokio::test]
    async fn get_returns_none_until_set_and_counts_writes() {
        let store = MemoryStore::default();
        assert!(store.is_empty());
        assert_eq!(store.get("abc").await.expect("get"), None);

        store.set("abc", "payload").await.expect("set");
        store.set("abc", "payload").await.expect("set again");

        assert_eq!(
            store.get("abc").await.expect("get").as_deref(),
            Some("payload")
        );
        assert_eq!(store.writes(), 2);
        assert_eq!(store.len(), 1);
    }
}
