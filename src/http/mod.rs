//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (lifecycle::service)
//!     → server.rs (Axum router, state)
//!     → middleware (CORS, request log when debug)
//!     → routes.rs (health, version)
//!     → Send to client
//! ```

pub mod middleware;
pub mod routes;
pub mod server;

pub use server::{bind_address, build_router, AppState};
