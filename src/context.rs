//! Process-wide context built once by the bootstrapper.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::observability::LogGuard;
use crate::storage::UserStore;

/// Everything downstream components need, initialized in dependency order.
///
/// Replaces global config/logger state: components receive a reference to
/// this struct instead of reaching for singletons.
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub keys: Arc<TokenKeys>,
    pub store: Arc<dyn UserStore>,
    // Dropped last so shutdown logs reach disk.
    _log_guard: LogGuard,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        keys: TokenKeys,
        store: Arc<dyn UserStore>,
        log_guard: LogGuard,
    ) -> Self {
        Self {
            config: Arc::new(config),
            keys: Arc::new(keys),
            store,
            _log_guard: log_guard,
        }
    }

    /// Deadline for graceful shutdown.
    pub fn shutdown_deadline(&self) -> Duration {
        Duration::from_secs(self.config.server.shutdown_timeout_secs)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
