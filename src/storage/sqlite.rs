//! SQLite-backed user store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode};

use crate::auth::hash_password;
use crate::storage::{Role, StorageError, UserStore};

const DATABASE_FILE: &str = "musannif.db";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL,
        created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
";

/// User store over a single SQLite connection.
pub struct SqliteStore {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database inside `directory` and apply the schema.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, StorageError> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(StorageError::Directory)?;

        let path = directory.join(DATABASE_FILE);
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;

        tracing::info!(path = %path.display(), "Database opened");

        Ok(Self {
            path,
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl UserStore for SqliteStore {
    fn create_user(&self, username: &str, password: &str, role: Role) -> Result<(), StorageError> {
        // Hash before taking the lock; Argon2 is slow.
        let hash = hash_password(password)?;

        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(StorageError::Closed)?;

        match conn.execute(
            "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
            params![username, hash, role.as_str()],
        ) {
            Ok(_) => {
                tracing::info!(username = %username, role = %role, "User created");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::UserExists(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn ping(&self) -> Result<(), StorageError> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(StorageError::Closed)?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    fn close(&self) -> Result<(), StorageError> {
        let conn = self.lock()?.take().ok_or(StorageError::Closed)?;
        conn.close().map_err(|(_, e)| StorageError::Database(e))?;
        tracing::info!(path = %self.path.display(), "Database closed");
        Ok(())
    }
}
