//! Command-line surface.
//!
//! Two mutually exclusive modes: `--signup` provisions a user and exits,
//! `--serve` runs the service until a termination signal.

pub mod dispatch;

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

pub use dispatch::execute;

#[derive(Parser, Debug, Clone)]
#[command(name = "musannif")]
#[command(about = "Markdown notes service", long_about = None)]
pub struct Cli {
    /// Create a user and exit
    #[arg(long)]
    pub signup: bool,

    /// Start the server
    #[arg(long)]
    pub serve: bool,

    /// Username for the new user
    #[arg(long)]
    pub username: Option<String>,

    /// Password for the new user
    #[arg(long)]
    pub password: Option<String>,

    /// Path to the TOML configuration file
    #[arg(long, env = "MUSANNIF_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,
}

/// A validated operating mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Signup { username: String, password: String },
    Serve,
}

/// Invalid or missing arguments. Reported before any side effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("No command specified. Use `--signup` or `--serve`")]
    NoCommand,

    #[error("username and password are required for signup")]
    MissingCredentials,
}

impl Cli {
    /// Select the mode and check its arguments. Signup wins if both are set.
    pub fn command(&self) -> Result<Command, UsageError> {
        if self.signup {
            let username = non_empty(&self.username).ok_or(UsageError::MissingCredentials)?;
            let password = non_empty(&self.password).ok_or(UsageError::MissingCredentials)?;
            return Ok(Command::Signup { username, password });
        }

        if self.serve {
            return Ok(Command::Serve);
        }

        Err(UsageError::NoCommand)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}
