//! Live adapter for the `TextGenerator` port using a local Ollama endpoint.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::ports::text_gen::{GenerationRequest, TextGenerator};

/// Live text generator that calls an Ollama server's generate API.
pub struct OllamaGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaGenerator {
    /// Creates a new Ollama generator for the given endpoint and model.
    #[must_use]
    pub fn new(endpoint: String, model: String) -> Self {
        Self { client: Client::new(), endpoint, model }
    }

    /// Verifies that the endpoint is reachable and serves the model.
    fn preflight(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/tags", self.endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| format!("Ollama endpoint check failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!(
                "Ollama endpoint '{}' is not accessible ({})",
                self.endpoint,
                response.status().as_u16()
            )
            .into());
        }

        let tags: TagList =
            response.json().map_err(|e| format!("Failed to parse Ollama tag listing: {e}"))?;
        if !tags.models.iter().any(|m| m.name == self.model) {
            return Err(format!(
                "Ollama model '{}' is not available at '{}'",
                self.model, self.endpoint
            )
            .into());
        }
        Ok(())
    }
}

/// Request body sent to the generate endpoint.
#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

/// Sampling options for a generate request.
#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

/// Response from the generate endpoint.
#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Tag listing from the tags endpoint.
#[derive(Deserialize)]
struct TagList {
    #[serde(default)]
    models: Vec<TagEntry>,
}

/// One model tag in the listing.
#[derive(Deserialize)]
struct TagEntry {
    name: String,
}

impl TextGenerator for OllamaGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.preflight()?;

        // Ollama has no separate system slot; prepend it to the prompt.
        let full_prompt = format!("{}\n\n{}", request.system_prompt, request.user_prompt);
        let body = OllamaRequest {
            model: &self.model,
            prompt: &full_prompt,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                top_p: 0.95,
                num_predict: request.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| format!("Ollama API request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Ollama API error ({})", status.as_u16()).into());
        }

        let api_response: OllamaResponse =
            response.json().map_err(|e| format!("Failed to parse Ollama API response: {e}"))?;
        Ok(api_response.response)
    }
}
