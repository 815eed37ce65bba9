//! Persistent store backed by redb.

use super::KvStore;
use crate::constants::REDB_FILE_NAME;
use crate::error::AppError;
use async_trait::async_trait;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Encoded code payloads keyed by short id.
const CODES: TableDefinition<&str, &str> = TableDefinition::new("codes");

/// [`KvStore`] over a single redb table.
///
/// redb calls block, so each operation runs on the blocking thread pool.
pub struct RedbStore {
    db: Arc<redb::Database>,
    path: PathBuf,
}

impl RedbStore {
    /// Open (or create) `<db_dir>/data.redb` and ensure the table exists.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or redb fails to
    /// open/initialize the file.
    pub fn open(db_dir: &str) -> Result<Self, AppError> {
        let dir = Path::new(db_dir);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StoreUnavailable(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;
        let path = dir.join(REDB_FILE_NAME);
        let db = redb::Database::create(&path)?;

        let write_txn = db.begin_write()?;
        write_txn.open_table(CODES)?;
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            path,
        })
    }

    /// Location of the redb file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&redb::Database) -> Result<T, AppError> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || op(db.as_ref()))
            .await
            .map_err(|err| AppError::StoreUnavailable(format!("redb task failed: {}", err)))?
    }
}

#[async_trait]
impl KvStore for RedbStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let key = key.to_string();
        self.run_blocking(move |db| {
            let read_txn = db.begin_read()?;
            let codes = read_txn.open_table(CODES)?;
            let value = codes.get(key.as_str())?;
            Ok(value.map(|guard| guard.value().to_string()))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let key = key.to_string();
        let value = value.to_string();
        self.run_blocking(move |db| {
            let write_txn = db.begin_write()?;
            {
                let mut codes = write_txn.open_table(CODES)?;
                codes.insert(key.as_str(), value.as_str())?;
            }
            write_txn.commit()?;
            Ok(())
        })
        .await
    }
}
