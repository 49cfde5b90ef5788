//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment value that enables request logging.
pub const DEBUG_ENVIRONMENT: &str = "debug";

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    pub server: ServerConfig,

    /// Filesystem locations and runtime environment.
    pub app: AppSettings,

    /// Credential-signing secrets.
    pub secrets: SecretsConfig,
}

impl AppConfig {
    /// Whether the request-logging middleware should be applied.
    pub fn is_debug(&self) -> bool {
        self.app.environment == DEBUG_ENVIRONMENT
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host or IP to bind (e.g., "127.0.0.1", "::1").
    pub host: String,

    /// TCP port to bind. Zero asks the OS for an ephemeral port.
    pub port: u16,

    /// Deadline for graceful shutdown before in-flight work is abandoned.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            shutdown_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory receiving `info.log` and `error.log`.
    pub log_directory: String,

    /// Directory holding the SQLite database file.
    pub sqlite_directory: String,

    /// Runtime environment name. `"debug"` turns on request logging.
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_directory: "logs".to_string(),
            sqlite_directory: "data".to_string(),
            environment: "production".to_string(),
        }
    }
}

/// Secrets used to sign access and refresh tokens.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecretsConfig {
    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
}

impl std::fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsConfig")
            .field("jwt_access_secret", &"<redacted>")
            .field("jwt_refresh_secret", &"<redacted>")
            .finish()
    }
}
