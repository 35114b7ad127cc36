//! Keyed document storage for tango.
//!
//! The deck store keeps its whole collection as one JSON document under a
//! fixed key. This module provides the storage primitive it writes to:
//!
//! - [`MemoryDocumentStore`] - a mutex-guarded map, used by tests and by
//!   `--ephemeral` runs
//! - [`SqliteDocumentStore`] - a single `SQLite` table, the default on-disk
//!   backend

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

use crate::error::Result;

/// A store of string documents addressed by key.
///
/// Implementations must be usable from the async deck store, hence the
/// `Send + Sync` bound. Calls complete synchronously.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Read the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the document stored under `key`.
    ///
    /// Returns `true` if a document was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<bool>;

    /// List every key, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>>;

    /// Short description of where documents live, for status output.
    fn location(&self) -> String;
}
