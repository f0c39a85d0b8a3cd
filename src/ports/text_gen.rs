//! Text-generation port for language-model backed document drafting.

use serde::{Deserialize, Serialize};

/// A request to generate a document from a text-generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Standing instructions describing the writer persona and format.
    pub system_prompt: String,
    /// The project-specific prompt to respond to.
    pub user_prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Generates text from a prompt via an external provider.
///
/// The closed set of provider variants lives in `src/adapters/live/`;
/// one of them is selected at configuration-load time. Callers must treat
/// every error as recoverable: document generation falls back to
/// deterministic templates whenever this port fails.
pub trait TextGenerator: Send + Sync {
    /// Generates text for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unreachable, rejects the
    /// credentials, does not serve the expected model, or returns a
    /// malformed response.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
