//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that required secrets and directories are present
//! - Validate value ranges (shutdown deadline > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("server.shutdown_timeout_secs must be greater than zero")]
    ZeroShutdownTimeout,
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("server.host", &config.server.host),
        ("app.log_directory", &config.app.log_directory),
        ("app.sqlite_directory", &config.app.sqlite_directory),
        ("secrets.jwt_access_secret", &config.secrets.jwt_access_secret),
        ("secrets.jwt_refresh_secret", &config.secrets.jwt_refresh_secret),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    if config.server.shutdown_timeout_secs == 0 {
        errors.push(ValidationError::ZeroShutdownTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
