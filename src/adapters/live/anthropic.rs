//! Live adapter for the `TextGenerator` port using the Anthropic messages API.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::ports::text_gen::{GenerationRequest, TextGenerator};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_MODELS_URL: &str = "https://api.anthropic.com/v1/models";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";

/// Live text generator that calls the Anthropic Claude API.
pub struct AnthropicGenerator {
    client: Client,
    api_key: String,
}

impl AnthropicGenerator {
    /// Creates a new Anthropic generator with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

/// Request body sent to the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

/// A single message in the Anthropic API request.
#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

/// A content block in the Anthropic response.
#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Model listing returned by the models endpoint.
#[derive(Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

/// One model in the listing.
#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

/// Error response from the Anthropic API.
#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

/// Detail inside an Anthropic error response.
#[derive(Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

impl AnthropicGenerator {
    /// Verifies that the configured model is accessible with this key.
    fn preflight(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .get(ANTHROPIC_MODELS_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .map_err(|e| format!("Anthropic model check failed: {e}"))?;

        if !response.status().is_success() {
            return Err(
                format!("Anthropic model check failed ({})", response.status().as_u16()).into()
            );
        }

        let models: ModelList = response
            .json()
            .map_err(|e| format!("Failed to parse Anthropic model listing: {e}"))?;
        if !models.data.iter().any(|m| m.id == ANTHROPIC_MODEL) {
            return Err(format!(
                "Anthropic model '{ANTHROPIC_MODEL}' is not accessible with this API key"
            )
            .into());
        }
        Ok(())
    }
}

impl TextGenerator for AnthropicGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.preflight()?;

        let body = AnthropicRequest {
            model: ANTHROPIC_MODEL,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system_prompt,
            messages: vec![AnthropicMessage { role: "user", content: &request.user_prompt }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .map_err(|e| format!("Anthropic API request failed: {e}"))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| format!("Failed to read Anthropic API response: {e}"))?;

        if !status.is_success() {
            let msg = serde_json::from_str::<AnthropicError>(&response_text)
                .map(|e| e.error.message)
                .unwrap_or(response_text);
            return Err(format!("Anthropic API error ({}): {msg}", status.as_u16()).into());
        }

        let api_response: AnthropicResponse = serde_json::from_str(&response_text)
            .map_err(|e| format!("Failed to parse Anthropic API response: {e}"))?;

        Ok(api_response.content.into_iter().map(|block| block.text).collect::<String>())
    }
}
