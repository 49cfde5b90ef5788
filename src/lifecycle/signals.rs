//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM)
//! - Translate every delivery into `Shutdown::trigger`
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers stay installed after the first signal so repeats are absorbed
//!   instead of killing the process mid-shutdown

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::Shutdown;

/// Forward termination signals to `shutdown` until the task is aborted.
///
/// The SIGTERM handler is installed before this returns. Must be called
/// from within a Tokio runtime.
pub fn spawn_listener(shutdown: Shutdown) -> JoinHandle<()> {
    #[cfg(unix)]
    let mut terminate =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(stream) => Some(stream),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                None
            }
        };

    tokio::spawn(async move {
        loop {
            #[cfg(unix)]
            let received = tokio::select! {
                res = tokio::signal::ctrl_c() => res.map(|()| "SIGINT"),
                Some(()) = recv_or_pending(&mut terminate) => Ok("SIGTERM"),
            };
            #[cfg(not(unix))]
            let received = tokio::signal::ctrl_c().await.map(|()| "Ctrl+C");

            let signal = match received {
                Ok(signal) => signal,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for shutdown signal");
                    return;
                }
            };

            if shutdown.trigger() {
                tracing::info!(signal, "Shutdown signal received");
            } else {
                tracing::debug!(signal, "Shutdown already in progress, ignoring signal");
            }
        }
    })
}

#[cfg(unix)]
async fn recv_or_pending(stream: &mut Option<tokio::signal::unix::Signal>) -> Option<()> {
    match stream {
        Some(stream) => stream.recv().await,
        None => std::future::pending().await,
    }
}
