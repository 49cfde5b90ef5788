//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize all subsystems in dependency order
//! - Hand the result to the caller as one `AppContext`
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and later steps never run
//! - Subsystems initialize in order, not concurrently
//! - Listeners are not part of startup; nothing binds until it succeeds

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::auth::{KeyError, TokenKeys};
use crate::config::{load_config, AppConfig, ConfigError};
use crate::context::AppContext;
use crate::observability::logging::{self, LogGuard, LoggingError, LoggingPaths};
use crate::storage::{SqliteStore, StorageError, UserStore};

/// Startup steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Config,
    Logging,
    Keys,
    Storage,
}

impl Step {
    pub const ORDER: [Step; 4] = [Step::Config, Step::Logging, Step::Keys, Step::Storage];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Config => "config",
            Step::Logging => "logger",
            Step::Keys => "credential keys",
            Step::Storage => "storage",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A startup step failed. Always fatal.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("error initializing config: {0}")]
    Config(#[source] ConfigError),

    #[error("error initializing logger: {0}")]
    Logging(#[source] LoggingError),

    #[error("error registering credential keys: {0}")]
    Keys(#[source] KeyError),

    #[error("error initializing storage: {0}")]
    Storage(#[source] StorageError),
}

impl InitError {
    /// The step that failed.
    pub fn step(&self) -> Step {
        match self {
            InitError::Config(_) => Step::Config,
            InitError::Logging(_) => Step::Logging,
            InitError::Keys(_) => Step::Keys,
            InitError::Storage(_) => Step::Storage,
        }
    }
}

/// The subsystems startup brings up. Each step sees only earlier outputs.
pub trait Subsystems {
    fn load_config(&self) -> Result<AppConfig, ConfigError>;
    fn init_logging(&self, config: &AppConfig) -> Result<LogGuard, LoggingError>;
    fn register_keys(&self, config: &AppConfig) -> Result<TokenKeys, KeyError>;
    fn init_storage(&self, config: &AppConfig) -> Result<Arc<dyn UserStore>, StorageError>;
}

/// Real subsystems: TOML file, log files, SQLite.
#[derive(Debug, Clone)]
pub struct ProductionSubsystems {
    config_path: PathBuf,
}

impl ProductionSubsystems {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }
}

impl Subsystems for ProductionSubsystems {
    fn load_config(&self) -> Result<AppConfig, ConfigError> {
        load_config(&self.config_path)
    }

    fn init_logging(&self, config: &AppConfig) -> Result<LogGuard, LoggingError> {
        logging::init(&LoggingPaths::in_directory(&config.app.log_directory))
    }

    fn register_keys(&self, config: &AppConfig) -> Result<TokenKeys, KeyError> {
        TokenKeys::from_secrets(&config.secrets)
    }

    fn init_storage(&self, config: &AppConfig) -> Result<Arc<dyn UserStore>, StorageError> {
        Ok(Arc::new(SqliteStore::open(&config.app.sqlite_directory)?))
    }
}

/// Run every startup step in order, stopping at the first failure.
pub fn bootstrap(subsystems: &impl Subsystems) -> Result<AppContext, InitError> {
    let config = subsystems.load_config().map_err(InitError::Config)?;
    let log_guard = subsystems
        .init_logging(&config)
        .map_err(InitError::Logging)?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        environment = %config.app.environment,
        "Configuration loaded"
    );

    let keys = subsystems
        .register_keys(&config)
        .map_err(InitError::Keys)?;
    tracing::debug!(step = %Step::Keys, "Subsystem initialized");

    let store = subsystems
        .init_storage(&config)
        .map_err(InitError::Storage)?;
    tracing::debug!(step = %Step::Storage, "Subsystem initialized");

    Ok(AppContext::new(config, keys, store, log_guard))
}
