//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;

use musannif::auth::{KeyError, TokenKeys};
use musannif::cli::{self, Cli};
use musannif::config::{AppConfig, ConfigError, ValidationError};
use musannif::lifecycle::{Shutdown, Step, Subsystems};
use musannif::observability::{LogGuard, LoggingError};
use musannif::storage::{Role, StorageError, UserStore};

/// Store that records every call instead of touching disk.
#[derive(Default)]
pub struct RecordingStore {
    created: Mutex<Vec<(String, String, Role)>>,
    closes: AtomicUsize,
    closed: AtomicBool,
    fail_create: bool,
    ping_delay: Option<Duration>,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// A store whose health check blocks for `delay`.
    pub fn slow_ping(delay: Duration) -> Self {
        Self {
            ping_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<(String, String, Role)> {
        self.created.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl UserStore for RecordingStore {
    fn create_user(&self, username: &str, password: &str, role: Role) -> Result<(), StorageError> {
        self.created
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string(), role));
        if self.fail_create {
            return Err(StorageError::UserExists(username.to_string()));
        }
        Ok(())
    }

    fn ping(&self) -> Result<(), StorageError> {
        if let Some(delay) = self.ping_delay {
            std::thread::sleep(delay);
        }
        if self.closed.load(Ordering::SeqCst) {
            Err(StorageError::Closed)
        } else {
            Ok(())
        }
    }

    fn close(&self) -> Result<(), StorageError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}

/// Subsystems that record the order they were brought up in.
pub struct FakeSubsystems {
    pub config: AppConfig,
    pub store: Arc<RecordingStore>,
    fail_at: Option<Step>,
    calls: Mutex<Vec<Step>>,
}

impl FakeSubsystems {
    pub fn new() -> Self {
        Self::with_store(RecordingStore::default())
    }

    pub fn with_store(store: RecordingStore) -> Self {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.secrets.jwt_access_secret = "access".into();
        config.secrets.jwt_refresh_secret = "refresh".into();

        Self {
            config,
            store: Arc::new(store),
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(step: Step) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Step> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, step: Step) -> bool {
        self.calls.lock().unwrap().push(step);
        self.fail_at == Some(step)
    }
}

impl Subsystems for FakeSubsystems {
    fn load_config(&self) -> Result<AppConfig, ConfigError> {
        if self.enter(Step::Config) {
            return Err(ConfigError::Validation(vec![ValidationError::ZeroShutdownTimeout]));
        }
        Ok(self.config.clone())
    }

    fn init_logging(&self, _config: &AppConfig) -> Result<LogGuard, LoggingError> {
        if self.enter(Step::Logging) {
            return Err(LoggingError::Subscriber("injected".into()));
        }
        Ok(LogGuard::default())
    }

    fn register_keys(&self, config: &AppConfig) -> Result<TokenKeys, KeyError> {
        if self.enter(Step::Keys) {
            return Err(KeyError::Empty("access"));
        }
        TokenKeys::from_secrets(&config.secrets)
    }

    fn init_storage(&self, _config: &AppConfig) -> Result<Arc<dyn UserStore>, StorageError> {
        if self.enter(Step::Storage) {
            return Err(StorageError::Closed);
        }
        let store: Arc<dyn UserStore> = self.store.clone();
        Ok(store)
    }
}

/// Run the binary's control flow against fakes and return the exit code.
pub async fn run(args: &[&str], subsystems: &FakeSubsystems, shutdown: Shutdown) -> u8 {
    let cli = Cli::try_parse_from(std::iter::once("musannif").chain(args.iter().copied()))
        .expect("arguments should parse");

    let command = match cli.command() {
        Ok(command) => command,
        Err(_) => return 1,
    };

    match cli::execute(command, subsystems, shutdown).await {
        Ok(()) => 0,
        Err(e) => e.exit_code(),
    }
}
