//! Command dispatch and handlers.

pub mod gitignore;
pub mod readme;
pub mod run;
pub mod setup;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// The configuration is loaded once and the live context is wired from
/// it; provider selection never happens again after this point.
///
/// # Errors
///
/// Returns an error string if configuration loading or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = AppConfig::load()?;
    let ctx = ServiceContext::live(&config);
    dispatch_with_context(command, &ctx, &config)
}

/// Dispatch a command with the given service context and configuration.
fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &AppConfig,
) -> Result<(), String> {
    match command {
        Command::Setup | Command::Reconfigure => setup::run(ctx, config),
        Command::Readme { path, doc_type } => readme::run(ctx, path, doc_type),
        Command::Gitignore { path } => gitignore::run(ctx, path),
        Command::Run { path, doc_type } => run::run(ctx, path, doc_type),
    }
}
