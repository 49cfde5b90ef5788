//! Credential handling.
//!
//! - keys.rs: token-signing secrets registered at startup
//! - password.rs: Argon2id hashing for stored user passwords

pub mod keys;
pub mod password;

pub use keys::{KeyError, TokenKeys};
pub use password::{hash_password, PasswordError};
