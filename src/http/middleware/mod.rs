//! HTTP middleware applied around the route table.
//!
//! - cors.rs: always applied
//! - request_log.rs: applied only in the debug environment

pub mod cors;
pub mod request_log;

pub use cors::cors;
pub use request_log::request_log;
