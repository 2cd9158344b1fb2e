//! Persistence backend trait for the record table.
//!
//! Defines [`TableDataStore`], the lowest storage layer. A backend knows how
//! to bootstrap, load, and replace the whole table; it does not serialize
//! concurrent callers. That is the job of [`RecordStore`](super::RecordStore),
//! which wraps a backend in the table lock.

use async_trait::async_trait;
use podium_core::RecordTable;

use super::error::StorageError;

/// Whole-table persistence backend.
///
/// Used as `Arc<dyn TableDataStore>`.
#[async_trait]
pub trait TableDataStore: Send + Sync {
    /// One-time bootstrap: create an empty table if none is persisted yet.
    ///
    /// Leaves an existing table untouched.
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Load the full table.
    ///
    /// Fails with [`StorageError::Read`] if the table is missing,
    /// unreadable, or malformed.
    async fn load(&self) -> Result<RecordTable, StorageError>;

    /// Replace the persisted table with `table`.
    ///
    /// Must be atomic for readers: a concurrent `load` sees the old or the new
    /// table, never a mix. On failure ([`StorageError::Write`]) the previous
    /// table must still be loadable.
    async fn save(&self, table: &RecordTable) -> Result<(), StorageError>;

    /// Human-readable location of the table, for logs.
    fn location(&self) -> String;
}
