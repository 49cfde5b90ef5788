//! HTTP handler construction.
//!
//! # Responsibilities
//! - Compute the bind address from configuration
//! - Create the Axum Router with all routes
//! - Wire up middleware (CORS always, request logging in debug)

use std::sync::Arc;

use axum::Router;

use crate::config::{AppConfig, ServerConfig};
use crate::context::AppContext;
use crate::http::{middleware, routes};
use crate::storage::UserStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn from_context(ctx: &AppContext) -> Self {
        Self {
            config: ctx.config.clone(),
            store: ctx.store.clone(),
        }
    }
}

/// Join host and port, bracketing bare IPv6 literals.
pub fn bind_address(server: &ServerConfig) -> String {
    let host = server.host.as_str();
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, server.port)
    } else {
        format!("{}:{}", host, server.port)
    }
}

/// Build the complete handler: routes, then CORS, then optional request log.
pub fn build_router(ctx: &AppContext) -> Router {
    let router = routes::attach(Router::new())
        .with_state(AppState::from_context(ctx))
        .layer(middleware::cors());

    if ctx.config.is_debug() {
        tracing::debug!("Request logging enabled");
        router.layer(middleware::request_log())
    } else {
        router
    }
}
