//! Persisted application configuration.
//!
//! The configuration is an immutable snapshot: edits go through the
//! `with_*` constructors, which return a new stamped snapshot, and the
//! result is written back explicitly. Nothing mutates a loaded config in
//! place.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "GITPREP_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Repository-host credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Account name on the host.
    pub username: String,
    /// Personal access token.
    pub token: String,
}

/// The configured text-generation provider.
///
/// A closed set of variants; exactly one is selected at
/// configuration-load time and wired behind the `TextGenerator` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// OpenAI chat completions.
    OpenAi {
        /// API key for the account.
        api_key: String,
    },
    /// Anthropic messages API.
    Anthropic {
        /// API key for the account.
        api_key: String,
    },
    /// A local or remote Ollama server.
    Ollama {
        /// Base URL of the server (e.g. `http://localhost:11434`).
        endpoint: String,
        /// Model tag to generate with.
        model: String,
    },
}

impl ProviderConfig {
    /// Short label used in menus and summaries.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::Anthropic { .. } => "anthropic",
            Self::Ollama { .. } => "ollama",
        }
    }
}

/// The full application configuration snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Repository-host credentials, when configured.
    #[serde(default)]
    pub github: Option<GitHubConfig>,
    /// Optional display alias for the user.
    #[serde(default)]
    pub alias: Option<String>,
    /// Selected text-generation provider, when configured.
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
    /// When this snapshot was last saved or edited.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppConfig {
    /// Returns a new snapshot with the given host credentials.
    #[must_use]
    pub fn with_github(&self, github: GitHubConfig) -> Self {
        Self { github: Some(github), updated_at: Some(Utc::now()), ..self.clone() }
    }

    /// Returns a new snapshot with the given alias (`None` clears it).
    #[must_use]
    pub fn with_alias(&self, alias: Option<String>) -> Self {
        Self { alias, updated_at: Some(Utc::now()), ..self.clone() }
    }

    /// Returns a new snapshot with the given provider selection.
    #[must_use]
    pub fn with_provider(&self, provider: Option<ProviderConfig>) -> Self {
        Self { provider, updated_at: Some(Utc::now()), ..self.clone() }
    }

    /// The directory holding the configuration file.
    ///
    /// `GITPREP_CONFIG_DIR` overrides the default of `~/.gitprep`.
    #[must_use]
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".gitprep")
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default (empty) snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, String> {
        Self::load_from(&Self::config_dir())
    }

    /// Loads the configuration from an explicit directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(dir: &std::path::Path) -> Result<Self, String> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Saves the configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_dir())
    }

    /// Saves the configuration to an explicit directory, restricting the
    /// file to owner read/write on Unix.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, dir: &std::path::Path) -> Result<(), String> {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create config dir {}: {e}", dir.display()))?;
        let path = dir.join(CONFIG_FILE_NAME);
        let yaml =
            serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(&path, yaml)
            .map_err(|e| format!("Failed to write config {}: {e}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| format!("Failed to restrict config permissions: {e}"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_yields_default() {
        let dir = std::env::temp_dir().join("gitprep_config_missing_test");
        let _ = std::fs::remove_dir_all(&dir);

        let config = AppConfig::load_from(&dir).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_and_load_round_trips() {
        let dir = std::env::temp_dir().join("gitprep_config_roundtrip_test");
        let _ = std::fs::remove_dir_all(&dir);

        let config = AppConfig::default()
            .with_github(GitHubConfig { username: "octo".into(), token: "t0k3n".into() })
            .with_alias(Some("octo-dev".into()))
            .with_provider(Some(ProviderConfig::Ollama {
                endpoint: "http://localhost:11434".into(),
                model: "codellama:7b-instruct".into(),
            }));
        config.save_to(&dir).unwrap();

        let loaded = AppConfig::load_from(&dir).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn with_edits_leave_original_untouched() {
        let base = AppConfig::default();
        let edited = base.with_alias(Some("someone".into()));

        assert!(base.alias.is_none());
        assert!(base.updated_at.is_none());
        assert_eq!(edited.alias.as_deref(), Some("someone"));
        assert!(edited.updated_at.is_some());
    }

    #[test]
    fn provider_serializes_with_kind_tag() {
        let provider = ProviderConfig::OpenAi { api_key: "sk-test".into() };
        let yaml = serde_yaml::to_string(&provider).unwrap();
        assert!(yaml.contains("kind: openai"));

        let back: ProviderConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, provider);
    }

    #[cfg(unix)]
    #[test]
    fn saved_config_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join("gitprep_config_perms_test");
        let _ = std::fs::remove_dir_all(&dir);

        AppConfig::default().save_to(&dir).unwrap();
        let mode = std::fs::metadata(dir.join("config.yaml")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
