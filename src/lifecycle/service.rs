//! Service lifecycle: the running listener.
//!
//! # Responsibilities
//! - Bind the TCP listener (fails before any task is spawned)
//! - Serve the handler on a background task with graceful shutdown
//! - Tell a requested stop apart from a listener failure
//!
//! # Design Decisions
//! - A listener that stops without a stop request is fatal; the task fires
//!   the cancellation signal so the main path can clean up and exit non-zero
//! - The stop token is private to the handle; only `shutdown` fires it

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::http::bind_address;
use crate::lifecycle::shutdown::{Shutdown, ShutdownError};

/// The listener could not run. Always fatal.
#[derive(Debug, Error)]
pub enum ListenError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    #[error("server stopped without a shutdown request")]
    Stopped,
}

/// How the serving task ended.
#[derive(Debug)]
pub enum ServiceExit {
    /// Stopped because shutdown was requested.
    Requested,
    /// Stopped for any other reason.
    Failed(ListenError),
}

impl ServiceExit {
    fn classify(result: io::Result<()>, stop_requested: bool) -> Self {
        match result {
            Ok(()) if stop_requested => ServiceExit::Requested,
            Ok(()) => ServiceExit::Failed(ListenError::Stopped),
            Err(e) => ServiceExit::Failed(ListenError::Serve(e)),
        }
    }
}

/// Bind the configured host and port.
pub async fn bind(server: &ServerConfig) -> Result<TcpListener, ListenError> {
    let addr = bind_address(server);
    TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| ListenError::Bind { addr, source })
}

/// Handle to the serving task. Exactly one exists while serving.
#[derive(Debug)]
pub struct RunningService {
    local_addr: SocketAddr,
    stop: CancellationToken,
    task: JoinHandle<ServiceExit>,
}

impl RunningService {
    /// Spawn the serving task on `listener`.
    pub fn start(
        listener: TcpListener,
        router: Router,
        shutdown: Shutdown,
    ) -> Result<Self, ListenError> {
        let local_addr = listener.local_addr().map_err(ListenError::Serve)?;
        let stop = CancellationToken::new();
        let stop_requested = stop.clone();

        let task = tokio::spawn(async move {
            tracing::info!(address = %local_addr, "Listening");

            let result = axum::serve(listener, router)
                .with_graceful_shutdown(stop_requested.clone().cancelled_owned())
                .await;

            let exit = ServiceExit::classify(result, stop_requested.is_cancelled());
            if let ServiceExit::Failed(e) = &exit {
                tracing::error!(error = %e, "Server stopped unexpectedly");
                shutdown.trigger();
            }
            exit
        });

        Ok(Self {
            local_addr,
            stop,
            task,
        })
    }

    /// Wrap an already spawned serving task.
    #[cfg(test)]
    pub(crate) fn from_task(local_addr: SocketAddr, task: JoinHandle<ServiceExit>) -> Self {
        Self {
            local_addr,
            stop: CancellationToken::new(),
            task,
        }
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting, let in-flight requests drain, give up after `deadline`.
    pub async fn shutdown(mut self, deadline: Duration) -> Result<ServiceExit, ShutdownError> {
        self.stop.cancel();

        match tokio::time::timeout(deadline, &mut self.task).await {
            Ok(joined) => Ok(joined?),
            Err(_) => {
                self.task.abort();
                let _ = (&mut self.task).await;
                Err(ShutdownError::Timeout(deadline))
            }
        }
    }
}
