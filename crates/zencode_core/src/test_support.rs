//! Shared test-only helpers for zencode_core.

use crate::error::AppError;
use crate::store::KvStore;
use crate::telemetry::Tracker;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Store whose every call fails as if the backend were unreachable.
pub(crate) struct UnreachableStore;

#[async_trait]
impl KvStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::StoreUnavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::StoreUnavailable("connection refused".to_string()))
    }
}

/// Store that reads as empty but fails on write.
pub(crate) struct ReadOnlyStore;

#[async_trait]
impl KvStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::StoreUnavailable("read-only replica".to_string()))
    }
}

/// Store that sleeps before answering, for timeout tests.
pub(crate) struct SlowStore {
    pub(crate) delay: Duration,
}

#[async_trait]
impl KvStore for SlowStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Tracker that records every event for assertions.
#[derive(Default)]
pub(crate) struct RecordingTracker {
    pub(crate) events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl Tracker for RecordingTracker {
    fn track(&self, event: &str, properties: serde_json::Value) {
        self.events
            .lock()
            .expect("tracker lock")
            .push((event.to_string(), properties));
    }
}
