//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc<AppConfig> inside AppContext
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload while serving
//! - All fields have defaults to allow minimal configs, secrets excepted
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, AppSettings, SecretsConfig, ServerConfig};
pub use validation::ValidationError;
