//! Live adapter for the `TextGenerator` port using the OpenAI chat API.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::ports::text_gen::{GenerationRequest, TextGenerator};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODELS_URL: &str = "https://api.openai.com/v1/models";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Live text generator that calls the OpenAI chat completions API.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
}

impl OpenAiGenerator {
    /// Creates a new OpenAI generator with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }

    /// Verifies that the configured model is accessible with this key.
    fn preflight(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .get(OPENAI_MODELS_URL)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| format!("OpenAI model check failed: {e}"))?;

        if !response.status().is_success() {
            return Err(
                format!("OpenAI model check failed ({})", response.status().as_u16()).into()
            );
        }

        let models: ModelList =
            response.json().map_err(|e| format!("Failed to parse OpenAI model listing: {e}"))?;
        if !models.data.iter().any(|m| m.id == OPENAI_MODEL) {
            return Err(
                format!("OpenAI model '{OPENAI_MODEL}' is not accessible with this API key").into()
            );
        }
        Ok(())
    }
}

/// Request body sent to the chat completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// A single chat message.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the chat completions endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

/// The message inside a completion choice.
#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
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

/// Error response from the OpenAI API.
#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

/// Detail inside an OpenAI error response.
#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl TextGenerator for OpenAiGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.preflight()?;

        let body = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![
                ChatMessage { role: "system", content: &request.system_prompt },
                ChatMessage { role: "user", content: &request.user_prompt },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| format!("OpenAI API request failed: {e}"))?;

        let status = response.status();
        let response_text =
            response.text().map_err(|e| format!("Failed to read OpenAI API response: {e}"))?;

        if !status.is_success() {
            let msg = serde_json::from_str::<OpenAiError>(&response_text)
                .map(|e| e.error.message)
                .unwrap_or(response_text);
            return Err(format!("OpenAI API error ({}): {msg}", status.as_u16()).into());
        }

        let api_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| format!("Failed to parse OpenAI API response: {e}"))?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "OpenAI API response contained no choices".into())
    }
}
