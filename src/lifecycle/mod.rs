//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Logger → Credential keys → Storage → AppContext
//!
//! Serve (runner.rs):
//!     Bind → service.rs (serving task) + shutdown.rs (coordinator task)
//!     → wait on completion barrier → release storage
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections (bounded) → Terminated
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown (repeats are ignored)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, keys, storage
//! - Shutdown has timeout: in-flight work abandoned after deadline
//! - Cleanup runs on the main path after the barrier, never on a task

pub mod runner;
pub mod service;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use runner::{release_resources, serve, serve_with_phases, CleanupError};
pub use service::{ListenError, RunningService, ServiceExit};
pub use shutdown::{Phase, Shutdown, ShutdownCoordinator, ShutdownError};
pub use startup::{bootstrap, InitError, ProductionSubsystems, Step, Subsystems};
