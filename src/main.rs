//! Musannif service entry point.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli (validate mode) ──▶ lifecycle::startup
//!                                     config → logger → keys → storage
//!                                               │
//!                     ┌─────────────────────────┴──────────────┐
//!                     ▼                                        ▼
//!               --signup                                  --serve
//!          storage.create_user                ┌──────────────────────────────┐
//!               exit 0/1                      │ serving task    (service.rs) │
//!                                             │ coordinator     (shutdown.rs)│
//!                                             │ signal listener (signals.rs) │
//!                                             └──────────────┬───────────────┘
//!                                                            ▼
//!                                            barrier → release storage → exit
//! ```
//!
//! Every exit path funnels through `main`, so cleanup is never skipped by an
//! abrupt process exit deeper in the stack.

use std::process::ExitCode;

use clap::Parser;

use musannif::cli::{self, Cli};
use musannif::lifecycle::{ProductionSubsystems, Shutdown};
use musannif::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let command = match cli.command() {
        Ok(command) => command,
        Err(e) => return fail(&AppError::from(e)),
    };

    let subsystems = ProductionSubsystems::new(cli.config);
    let result = cli::execute(command, &subsystems, Shutdown::new()).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(error: &AppError) -> ExitCode {
    eprintln!("error: {error}");
    ExitCode::from(error.exit_code())
}
