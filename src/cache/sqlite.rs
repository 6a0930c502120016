//! SQLite-backed translation store.

use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use super::{StorageError, TranslationStore};
use crate::paths;
use crate::translation::Translation;

/// Schema version stamped on the database at open.
const SCHEMA_VERSION: i32 = 1;

/// A file-backed store holding one connection for the lifetime of the
/// invocation. The connection is closed when the store is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the store in the user cache directory, creating the
    /// directory and database on first use.
    pub fn open_default() -> anyhow::Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Ok(Self::open(cache_dir.join("translations.db"))?)
    }

    /// Opens and initializes the database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path).map_err(|source| StorageError::Open {
            path: db_path.to_path_buf(),
            source,
        })?;

        let store = Self { conn };
        store.init_db()?;

        Ok(store)
    }

    fn init_db(&self) -> Result<(), StorageError> {
        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                index_key TEXT UNIQUE NOT NULL,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_index_key ON translations(index_key)",
            [],
        )?;

        Ok(())
    }

    fn existing_id(&self, index_key: &str) -> Result<Option<i64>, StorageError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id FROM translations WHERE index_key = ?1",
                [index_key],
                |row| row.get(0),
            )
            .optional()?)
    }
}

impl TranslationStore for SqliteStore {
    fn lookup(&self, index_key: &str) -> Result<Option<Translation>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source_text, translated_text, source_language, target_language
             FROM translations WHERE index_key = ?1",
        )?;

        let translation = stmt
            .query_row([index_key], |row| {
                Ok(Translation {
                    id: Some(row.get(0)?),
                    text: row.get(1)?,
                    translated_text: row.get(2)?,
                    source_language: row.get(3)?,
                    target_language: row.get(4)?,
                })
            })
            .optional()?;

        Ok(translation)
    }

    fn upsert_by_key(&self, translation: &mut Translation) -> Result<bool, StorageError> {
        let index_key = translation.index_key();

        let mut was_updated = false;
        if translation.id.is_none()
            && let Some(id) = self.existing_id(&index_key)?
        {
            translation.id = Some(id);
            was_updated = true;
        }

        if let Some(id) = translation.id {
            self.conn.execute(
                "INSERT OR REPLACE INTO translations
                 (id, index_key, source_text, translated_text, source_language, target_language)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id,
                    index_key,
                    translation.text,
                    translation.translated_text,
                    translation.source_language,
                    translation.target_language
                ],
            )?;
        } else {
            self.conn.execute(
                "INSERT INTO translations
                 (index_key, source_text, translated_text, source_language, target_language)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    index_key,
                    translation.text,
                    translation.translated_text,
                    translation.source_language,
                    translation.target_language
                ],
            )?;
            translation.id = Some(self.conn.last_insert_rowid());
        }

        Ok(was_updated)
    }

    fn reset_all(&mut self) -> Result<(), StorageError> {
        let tx = self.conn.transaction().map_err(StorageError::Transaction)?;
        tx.execute("DELETE FROM translations", [])?;
        tx.commit().map_err(StorageError::Transaction)?;
        Ok(())
    }
}
