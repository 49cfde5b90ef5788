//! Musannif service library.

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::AppError;
pub use lifecycle::Shutdown;
