//! SQLite-backed store for OAuth tokens.

use std::path::Path;

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::AuthError;

/// A persisted OAuth token record, keyed by its refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub refresh_token: String,
    pub access_token: String,
    /// Expiry as Unix epoch milliseconds.
    pub expires_at_ms: i64,
}

impl StoredToken {
    /// Whether the access token is past its recorded expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }
}

/// SQLite store for OAuth tokens.
///
/// Writes are idempotent upserts keyed by refresh token: concurrent
/// refreshes race benignly, the last writer wins, and the primary key
/// guarantees at most one record per refresh token.
pub struct TokenStore {
    conn: Mutex<Connection>,
}

impl TokenStore {
    /// Open (or create) a store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store. Mainly useful in tests.
    pub fn in_memory() -> Result<Self, AuthError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), AuthError> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS oauth_tokens (
                refresh_token TEXT PRIMARY KEY,
                access_token TEXT NOT NULL,
                expires_at_ms INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Look up the token record for a refresh token.
    pub fn find(&self, refresh_token: &str) -> Result<Option<StoredToken>, AuthError> {
        let conn = self.conn.lock();
        let token = conn
            .query_row(
                "SELECT refresh_token, access_token, expires_at_ms FROM oauth_tokens WHERE refresh_token = ?1",
                params![refresh_token],
                |row| {
                    Ok(StoredToken {
                        refresh_token: row.get(0)?,
                        access_token: row.get(1)?,
                        expires_at_ms: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(token)
    }

    /// Insert or replace the token record for a refresh token.
    pub fn upsert(
        &self,
        refresh_token: &str,
        access_token: &str,
        expires_at_ms: i64,
    ) -> Result<(), AuthError> {
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO oauth_tokens (refresh_token, access_token, expires_at_ms) VALUES (?1, ?2, ?3)",
            params![refresh_token, access_token, expires_at_ms],
        )?;
        tracing::debug!("Stored refreshed access token");
        Ok(())
    }

    #[cfg(test)]
    fn count(&self) -> Result<i64, AuthError> {
        let count = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM oauth_tokens", [], |row| row.get(0))?;
        Ok(count)
    }
}
