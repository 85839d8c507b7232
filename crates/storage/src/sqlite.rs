//! `SQLite`-backed key-value store.
//!
//! Queries are synchronous; the async [`KeyValueStore`] impl runs them on
//! the tokio blocking pool.

use std::path::Path;

use async_trait::async_trait;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StorageError;
use crate::migrations;
use crate::traits::KeyValueStore;

type PooledConn = PooledConnection<SqliteConnectionManager>;

const POOL_SIZE: u32 = 4;

/// Key-value store wrapping a `SQLite` connection pool.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 5000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and migrates it.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(POOL_SIZE).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(path = %db_path.display(), pool_size = POOL_SIZE, "Key-value store opened");
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConn, StorageError> {
        Ok(self.pool.get()?)
    }

    pub fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    pub fn delete_value(&self, key: &str) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }
}

/// Run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| StorageError::Join(e.to_string()))?
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = self.clone();
        let key = key.to_owned();
        blocking(move || store.get_value(&key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let store = self.clone();
        let key = key.to_owned();
        let value = value.to_owned();
        blocking(move || store.put_value(&key, &value)).await
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let store = self.clone();
        let key = key.to_owned();
        blocking(move || store.delete_value(&key)).await
    }
}
