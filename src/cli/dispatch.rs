//! Mode execution after argument validation.

use crate::context::AppContext;
use crate::error::AppError;
use crate::lifecycle::{self, bootstrap, signals, Shutdown, Subsystems};
use crate::storage::Role;

use super::Command;

/// Bring subsystems up and run `command` to completion.
///
/// The single place fatal errors are logged; the caller turns the result
/// into an exit code.
pub async fn execute(
    command: Command,
    subsystems: &impl Subsystems,
    shutdown: Shutdown,
) -> Result<(), AppError> {
    let ctx = bootstrap(subsystems)?;

    let result = match command {
        Command::Signup { username, password } => provision(&ctx, username, password).await,
        Command::Serve => serve(&ctx, shutdown).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Fatal error");
    }
    result
}

/// Signals are only forwarded once startup has succeeded; a signal during
/// startup falls through to the default disposition.
async fn serve(ctx: &AppContext, shutdown: Shutdown) -> Result<(), AppError> {
    let listener = signals::spawn_listener(shutdown.clone());
    let result = lifecycle::serve(ctx, shutdown).await;
    listener.abort();
    result.map_err(AppError::from)
}

async fn provision(ctx: &AppContext, username: String, password: String) -> Result<(), AppError> {
    let store = ctx.store.clone();
    let created = tokio::task::spawn_blocking(move || {
        store.create_user(&username, &password, Role::User)
    })
    .await;

    lifecycle::release_resources(ctx);

    created?.map_err(AppError::Provision)
}
