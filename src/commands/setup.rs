//! `gitprep setup` command: menu-driven configuration editing.

use std::path::Path;

use crate::config::{AppConfig, GitHubConfig, ProviderConfig};
use crate::context::ServiceContext;

/// Execute the `setup` command against the default config location.
///
/// # Errors
///
/// Returns an error string if prompting fails or the configuration
/// cannot be saved.
pub fn run(ctx: &ServiceContext, config: &AppConfig) -> Result<(), String> {
    run_with_dir(ctx, config, &AppConfig::config_dir())
}

/// Execute the `setup` command, saving to an explicit directory.
///
/// Each menu choice produces a new configuration snapshot; nothing is
/// persisted until the user picks "Save & exit".
///
/// # Errors
///
/// Returns an error string if prompting fails or the configuration
/// cannot be saved.
pub fn run_with_dir(
    ctx: &ServiceContext,
    config: &AppConfig,
    dir: &Path,
) -> Result<(), String> {
    let mut snapshot = config.clone();

    loop {
        print_summary(ctx, &snapshot);
        let choice = ctx
            .prompter
            .select(
                "What would you like to do?",
                &[
                    "Edit GitHub credentials",
                    "Edit text provider",
                    "Edit alias",
                    "Save & exit",
                    "Cancel without saving",
                ],
            )
            .map_err(|e| format!("Failed to read input: {e}"))?;

        match choice {
            0 => snapshot = edit_github(ctx, &snapshot)?,
            1 => snapshot = edit_provider(ctx, &snapshot)?,
            2 => snapshot = edit_alias(ctx, &snapshot)?,
            3 => {
                snapshot.save_to(dir)?;
                ctx.diag.info("Configuration saved.");
                return Ok(());
            }
            _ => {
                ctx.diag.info("Exited without saving changes.");
                return Ok(());
            }
        }
    }
}

/// Shows the current snapshot before each menu round.
fn print_summary(ctx: &ServiceContext, config: &AppConfig) {
    let github = config
        .github
        .as_ref()
        .map_or_else(|| "not set".to_string(), |g| g.username.clone());
    let alias = config.alias.as_deref().unwrap_or("not set");
    let provider = config
        .provider
        .as_ref()
        .map_or("none configured", ProviderConfig::label);
    ctx.diag.info(&format!(
        "Current configuration — GitHub: {github} | alias: {alias} | provider: {provider}"
    ));
}

fn edit_github(ctx: &ServiceContext, config: &AppConfig) -> Result<AppConfig, String> {
    let current = config.github.as_ref();
    let username = ctx
        .prompter
        .input("GitHub username", current.map(|g| g.username.as_str()))
        .map_err(|e| format!("Failed to read input: {e}"))?;
    let token = ctx
        .prompter
        .input("GitHub access token", None)
        .map_err(|e| format!("Failed to read input: {e}"))?;
    Ok(config.with_github(GitHubConfig { username, token }))
}

fn edit_provider(ctx: &ServiceContext, config: &AppConfig) -> Result<AppConfig, String> {
    let choice = ctx
        .prompter
        .select("Select text provider", &["openai", "anthropic", "ollama", "none"])
        .map_err(|e| format!("Failed to read input: {e}"))?;

    let provider = match choice {
        0 => Some(ProviderConfig::OpenAi { api_key: ask_api_key(ctx)? }),
        1 => Some(ProviderConfig::Anthropic { api_key: ask_api_key(ctx)? }),
        2 => {
            let endpoint = ctx
                .prompter
                .input("Ollama endpoint", Some("http://localhost:11434"))
                .map_err(|e| format!("Failed to read input: {e}"))?;
            let model = ctx
                .prompter
                .input("Ollama model", Some("codellama:7b-instruct"))
                .map_err(|e| format!("Failed to read input: {e}"))?;
            Some(ProviderConfig::Ollama { endpoint, model })
        }
        _ => None,
    };
    Ok(config.with_provider(provider))
}

fn ask_api_key(ctx: &ServiceContext) -> Result<String, String> {
    ctx.prompter.input("API key", None).map_err(|e| format!("Failed to read input: {e}"))
}

fn edit_alias(ctx: &ServiceContext, config: &AppConfig) -> Result<AppConfig, String> {
    let alias = ctx
        .prompter
        .input("Alias", config.alias.as_deref())
        .map_err(|e| format!("Failed to read input: {e}"))?;
    Ok(config.with_alias(if alias.is_empty() { None } else { Some(alias) }))
}
