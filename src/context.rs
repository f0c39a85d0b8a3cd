//! Service context bundling all port trait objects.

use crate::adapters::live::anthropic::AnthropicGenerator;
use crate::adapters::live::console::{ConsoleDiagnostics, ConsolePrompter};
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::github::GitHubHost;
use crate::adapters::live::gitignore_io::GitignoreIo;
use crate::adapters::live::ollama::OllamaGenerator;
use crate::adapters::live::openai::OpenAiGenerator;
use crate::config::{AppConfig, ProviderConfig};
use crate::ports::diagnostics::Diagnostics;
use crate::ports::filesystem::FileSystem;
use crate::ports::prompter::Prompter;
use crate::ports::repo_host::RepoHost;
use crate::ports::template_source::TemplateSource;
use crate::ports::text_gen::TextGenerator;

/// Bundles all port trait objects into a single context.
///
/// Provider and host selection happens exactly once, here, when the
/// context is wired from the loaded configuration; commands never
/// re-dispatch on provider names. Unconfigured boundaries stay `None`
/// and callers degrade (template generation) or fail fast (deploy).
pub struct ServiceContext {
    /// Filesystem for scanning and file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Text-generation provider, when one is configured.
    pub text_gen: Option<Box<dyn TextGenerator>>,
    /// Repository host, when credentials are configured.
    pub host: Option<Box<dyn RepoHost>>,
    /// Gitignore-template service.
    pub templates: Box<dyn TemplateSource>,
    /// Interactive prompter for menu-driven decisions.
    pub prompter: Box<dyn Prompter>,
    /// Diagnostics sink for progress and warnings.
    pub diag: Box<dyn Diagnostics>,
}

impl ServiceContext {
    /// Creates a live context wired from the given configuration.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        let text_gen: Option<Box<dyn TextGenerator>> =
            config.provider.as_ref().map(|provider| match provider {
                ProviderConfig::OpenAi { api_key } => {
                    Box::new(OpenAiGenerator::new(api_key.clone())) as Box<dyn TextGenerator>
                }
                ProviderConfig::Anthropic { api_key } => {
                    Box::new(AnthropicGenerator::new(api_key.clone())) as Box<dyn TextGenerator>
                }
                ProviderConfig::Ollama { endpoint, model } => {
                    Box::new(OllamaGenerator::new(endpoint.clone(), model.clone()))
                        as Box<dyn TextGenerator>
                }
            });

        let host: Option<Box<dyn RepoHost>> = config.github.as_ref().map(|github| {
            Box::new(GitHubHost::new(github.username.clone(), github.token.clone()))
                as Box<dyn RepoHost>
        });

        Self {
            fs: Box::new(LiveFileSystem),
            text_gen,
            host,
            templates: Box::new(GitignoreIo::new()),
            prompter: Box::new(ConsolePrompter),
            diag: Box::new(ConsoleDiagnostics),
        }
    }
}
