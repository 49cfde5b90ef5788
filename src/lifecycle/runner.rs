//! Serve mode: listener, coordinator, barrier, cleanup.
//!
//! ```text
//! main path ──bind──▶ spawn serving task ──▶ spawn coordinator (tracked)
//!     │                                             │
//!     └──────────── tracker.wait() ◀── Terminated ──┘
//!                        │
//!                        ▼
//!                 release storage (exactly once)
//! ```

use thiserror::Error;
use tokio::sync::watch;
use tokio_util::task::TaskTracker;

use crate::context::AppContext;
use crate::http::build_router;
use crate::lifecycle::service::{self, ListenError, RunningService, ServiceExit};
use crate::lifecycle::shutdown::{Phase, Shutdown, ShutdownCoordinator};
use crate::storage::StorageError;

/// Releasing resources after shutdown failed. Never fatal.
#[derive(Debug, Error)]
#[error("failed to cleanup database: {0}")]
pub struct CleanupError(#[from] StorageError);

/// Serve until `shutdown` fires, then release storage.
///
/// Storage is released exactly once on every path out of this function,
/// including bind failures and listener failures.
pub async fn serve(ctx: &AppContext, shutdown: Shutdown) -> Result<(), ListenError> {
    serve_with_phases(ctx, shutdown, None).await
}

/// Like [`serve`], publishing coordinator phases to `phases` when given.
pub async fn serve_with_phases(
    ctx: &AppContext,
    shutdown: Shutdown,
    phases: Option<watch::Sender<Phase>>,
) -> Result<(), ListenError> {
    let started = start_service(ctx, &shutdown).await;
    run_to_completion(ctx, started, shutdown, phases).await
}

async fn start_service(
    ctx: &AppContext,
    shutdown: &Shutdown,
) -> Result<RunningService, ListenError> {
    let router = build_router(ctx);
    let listener = service::bind(&ctx.config.server).await?;
    RunningService::start(listener, router, shutdown.clone())
}

async fn run_to_completion(
    ctx: &AppContext,
    started: Result<RunningService, ListenError>,
    shutdown: Shutdown,
    phases: Option<watch::Sender<Phase>>,
) -> Result<(), ListenError> {
    let result = match started {
        Ok(running) => supervise(ctx, running, shutdown, phases).await,
        Err(e) => Err(e),
    };
    release_resources(ctx);
    result
}

async fn supervise(
    ctx: &AppContext,
    running: RunningService,
    shutdown: Shutdown,
    phases: Option<watch::Sender<Phase>>,
) -> Result<(), ListenError> {
    let mut coordinator = ShutdownCoordinator::new(shutdown, ctx.shutdown_deadline());
    if let Some(tx) = phases {
        coordinator = coordinator.with_phase_channel(tx);
    }

    let tracker = TaskTracker::new();
    let outcome = tracker.spawn(coordinator.run(running));
    tracker.close();
    tracker.wait().await;

    match outcome.await {
        Ok(Ok(ServiceExit::Requested)) => Ok(()),
        Ok(Ok(ServiceExit::Failed(e))) => Err(e),
        // Already logged by the coordinator.
        Ok(Err(_)) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "Shutdown coordinator panicked");
            Ok(())
        }
    }
}

/// Close the shared storage handle, logging any failure.
pub fn release_resources(ctx: &AppContext) {
    match ctx.store.close().map_err(CleanupError::from) {
        Ok(()) => tracing::info!("Resources released"),
        Err(e) => tracing::error!(error = %e, "Cleanup failed"),
    }
}
