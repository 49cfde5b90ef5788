//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!
//! Consumers (logging.rs):
//!     → stdout
//!     → <log_directory>/info.log   (INFO and above)
//!     → <log_directory>/error.log  (ERROR only)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request logging is a middleware concern (see `http::middleware`)

pub mod logging;

pub use logging::{LogGuard, LoggingError, LoggingPaths};
