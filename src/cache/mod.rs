//! Translation cache persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::translation::Translation;

mod sqlite;

pub use sqlite::SqliteStore;

/// Failures in the cache persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open cache database {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("unable to start a cache transaction")]
    Transaction(#[source] rusqlite::Error),

    #[error("cache operation failed")]
    Query(#[from] rusqlite::Error),
}

/// Capability interface over the translation cache.
///
/// Concrete implementations are injected into the processor at
/// construction.
pub trait TranslationStore {
    /// Point lookup by the derived composite key.
    fn lookup(&self, index_key: &str) -> Result<Option<Translation>, StorageError>;

    /// Inserts or updates a record by its composite key.
    ///
    /// When the incoming record carries no identity and a row with the
    /// same key already exists, the existing row's identity is adopted and
    /// the row is updated in place; returns `true` in that case. A store
    /// never holds two rows with the same key.
    fn upsert_by_key(&self, translation: &mut Translation) -> Result<bool, StorageError>;

    /// Removes every cached translation, transactionally.
    fn reset_all(&mut self) -> Result<(), StorageError>;
}
