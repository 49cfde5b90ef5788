//! Fatal errors that end the process with a non-zero exit code.
//!
//! Non-fatal errors (`ShutdownError`, `CleanupError`) never reach this type;
//! they are logged where they happen.

use thiserror::Error;

use crate::cli::UsageError;
use crate::lifecycle::{InitError, ListenError};
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error("error creating user: {0}")]
    Provision(#[source] StorageError),

    #[error("provisioning task failed: {0}")]
    ProvisionTask(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Listen(#[from] ListenError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
