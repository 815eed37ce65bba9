//! Key-value store contract used by the share gateway.

mod disk;
mod memory;

pub use disk::RedbStore;
pub use memory::MemoryStore;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;

/// Minimal get/set store addressed by short id.
///
/// Values are opaque strings (the codec's encoded form). Implementations must
/// make `set` a single atomic write.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored at `key`.
    ///
    /// # Returns
    /// `Ok(Some(value))` when present, `Ok(None)` when absent.
    ///
    /// # Errors
    /// Returns a transient [`AppError`] when the backend cannot be reached.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a transient [`AppError`] when the backend cannot be reached.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Open the backend selected by `config.store_backend`.
///
/// # Errors
/// Propagates redb open/initialization failures.
pub fn open_store(config: &Config) -> Result<Arc<dyn KvStore>, AppError> {
    match config.store_backend {
        StoreBackend::Redb => {
            let store = RedbStore::open(&config.db_path)?;
            tracing::info!("Using redb store at {}", store.path().display());
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; shared code is lost on restart");
            Ok(Arc::new(MemoryStore::default()))
        }
    }
}
