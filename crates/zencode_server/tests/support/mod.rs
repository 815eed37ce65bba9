//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use zencode_core::MemoryStore;
use zencode_server::{
    config::StoreBackend, create_app, open_store, AppError, AppState, Config, KvStore, Tracker,
};

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        db_path: db_path.to_str().expect("db path").to_string(),
        port: 0,
        bind: None,
        public_url: Some("http://zen.test".to_string()),
        max_code_size: 10_000_000,
        store_timeout: Duration::from_secs(5),
        store_backend: StoreBackend::Redb,
        allow_public_access: false,
        telemetry: false,
    }
}

pub(crate) fn test_server_for_store(
    config: Config,
    store: Arc<dyn KvStore>,
    tracker: Arc<dyn Tracker>,
) -> TestServer {
    let state = AppState::with_tracker(config, store, tracker);
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config_for_db_path(&temp_dir.path().join("db"));
    let store = open_store(&config).expect("open store");
    let server = test_server_for_store(config, store, Arc::new(RecordingTracker::default()));
    (server, temp_dir)
}

pub(crate) fn memory_test_server(config: Config) -> (TestServer, Arc<MemoryStore>, Arc<RecordingTracker>) {
    let store = Arc::new(MemoryStore::default());
    let tracker = Arc::new(RecordingTracker::default());
    let server = test_server_for_store(config, store.clone(), tracker.clone());
    (server, store, tracker)
}

/// Store that fails every call as if the backend were down.
pub(crate) struct DownStore;

#[async_trait]
impl KvStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::StoreUnavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::StoreUnavailable("connection refused".to_string()))
    }
}

#[derive(Default)]
pub(crate) struct RecordingTracker {
    events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingTracker {
    pub(crate) fn events(&self) -> Vec<(String, serde_json::Value)> {
        self.events.lock().expect("tracker lock").clone()
    }
}

impl Tracker for RecordingTracker {
    fn track(&self, event: &str, properties: serde_json::Value) {
        self.events
            .lock()
            .expect("tracker lock")
            .push((event.to_string(), properties));
    }
}
