//! Core domain library for ZenCode (classification, ids, codec, storage).

/// Payload encoding for the key-value store.
pub mod codec;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Language detection for syntax highlighting.
pub mod detection;
/// Application error types (storage/domain).
pub mod error;
/// Idempotent share/resolve orchestration.
pub mod gateway;
/// Content-derived short identifiers.
pub mod ident;
/// Key-value store contract and backends.
pub mod store;
/// Injected analytics capability.
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use detection::{classify, LanguageTag};
pub use error::AppError;
pub use gateway::{ShareGateway, ShareResult};
pub use ident::{derive_id, ShortId};
pub use store::{open_store, KvStore, MemoryStore, RedbStore};
pub use telemetry::{LogTracker, NoopTracker, Tracker};
