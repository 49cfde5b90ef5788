//! Shutdown coordination.
//!
//! ```text
//! Serving → AwaitingSignal → ShuttingDown → Terminated
//! ```
//!
//! The coordinator runs on its own task. It waits for the cancellation
//! signal, asks the running service to stop, and gives it a bounded amount of
//! time to drain. Whatever the outcome it ends in `Terminated`, which is what
//! releases the main path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::lifecycle::service::{RunningService, ServiceExit};

/// Single-shot cancellation signal.
///
/// Any number of clones may call `trigger`; only the first one has effect.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Returns `true` only for the call that fired it.
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.token.cancel();
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Resolve once the signal has fired.
    pub async fn triggered(&self) {
        self.token.cancelled().await
    }
}

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Serving,
    AwaitingSignal,
    ShuttingDown,
    Terminated,
}

/// Graceful shutdown did not complete cleanly. Never fatal.
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("graceful shutdown exceeded {0:?}; in-flight requests abandoned")]
    Timeout(Duration),

    #[error("serving task did not join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Drives the running service from signal to termination.
pub struct ShutdownCoordinator {
    shutdown: Shutdown,
    deadline: Duration,
    phase: watch::Sender<Phase>,
}

impl ShutdownCoordinator {
    pub fn new(shutdown: Shutdown, deadline: Duration) -> Self {
        let (phase, _) = watch::channel(Phase::Serving);
        Self {
            shutdown,
            deadline,
            phase,
        }
    }

    /// Publish phase transitions on an existing channel instead.
    pub fn with_phase_channel(mut self, phase: watch::Sender<Phase>) -> Self {
        phase.send_replace(Phase::Serving);
        self.phase = phase;
        self
    }

    /// Observe phase transitions.
    pub fn phases(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Wait for the signal, then stop `service` within the deadline.
    ///
    /// Shutdown errors are logged here; the result is returned so the caller
    /// can tell a requested stop from a listener failure.
    pub async fn run(self, service: RunningService) -> Result<ServiceExit, ShutdownError> {
        self.phase.send_replace(Phase::AwaitingSignal);
        self.shutdown.triggered().await;

        self.phase.send_replace(Phase::ShuttingDown);
        tracing::info!(
            deadline_secs = self.deadline.as_secs_f64(),
            "Shutting down server"
        );

        let result = service.shutdown(self.deadline).await;
        match &result {
            Ok(ServiceExit::Requested) => tracing::info!("Server stopped gracefully"),
            Ok(ServiceExit::Failed(e)) => {
                tracing::error!(error = %e, "Server had already stopped unexpectedly")
            }
            Err(e) => tracing::error!(error = %e, "Failed to shutdown server"),
        }

        self.phase.send_replace(Phase::Terminated);
        result
    }
}
