//! Route table.
//!
//! The orchestrator only needs a handler to serve; the table here is the
//! service's operational surface.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub environment: String,
}

/// Register every route on `router`.
pub fn attach(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/health", get(health))
        .route("/api/version", get(version))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let store = state.store.clone();
    let pinged = tokio::task::spawn_blocking(move || store.ping()).await;

    match pinged {
        Ok(Ok(())) => (StatusCode::OK, Json(HealthStatus { status: "ok" })),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus { status: "unavailable" }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check task failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus { status: "unavailable" }),
            )
        }
    }
}

async fn version(State(state): State<AppState>) -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.app.environment.clone(),
    })
}
