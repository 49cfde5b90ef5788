//! Persistent storage subsystem.
//!
//! # Responsibilities
//! - Open the user database under the configured directory
//! - Provision users (username, hashed password, role)
//! - Release the database handle exactly once at process end
//!
//! # Design Decisions
//! - Callers depend on the `UserStore` trait, not on SQLite
//! - The handle is shared via `Arc<dyn UserStore>`; only cleanup closes it
//! - Operations on a closed store fail with `StorageError::Closed`

pub mod sqlite;

use std::fmt;

use thiserror::Error;

use crate::auth::PasswordError;

pub use sqlite::SqliteStore;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot create storage directory: {0}")]
    Directory(#[source] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("storage is closed")]
    Closed,

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Role stored alongside a user. Provisioning only ever assigns `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract between the orchestrator and persistent storage.
///
/// Implementations are blocking; async callers go through `spawn_blocking`.
pub trait UserStore: Send + Sync {
    /// Create a user with a freshly hashed password.
    fn create_user(&self, username: &str, password: &str, role: Role) -> Result<(), StorageError>;

    /// Cheap liveness check used by the health route.
    fn ping(&self) -> Result<(), StorageError>;

    /// Release the underlying handle. A second call returns `Closed`.
    fn close(&self) -> Result<(), StorageError>;
}
