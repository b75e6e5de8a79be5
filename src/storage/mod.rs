//! The string-keyed persistence boundary the journal sits on: whole-value
//! reads and writes, nothing indexed.

use async_trait::async_trait;

use crate::error::StorageError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing has been stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the whole value under `key`. A single call is atomic.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
