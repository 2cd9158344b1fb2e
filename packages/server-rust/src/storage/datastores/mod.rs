//! `TableDataStore` implementations.
//!
//! Provides concrete backends for the [`TableDataStore`](super::TableDataStore) trait:
//! [`CsvFileDataStore`] for deployments and [`MemoryDataStore`] for tests and
//! ephemeral runs.

mod csv_file;
mod memory;

pub use csv_file::CsvFileDataStore;
pub use memory::MemoryDataStore;
