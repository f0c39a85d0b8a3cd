//! Live adapter for the `TemplateSource` port using the gitignore.io API.

use reqwest::blocking::Client;

use crate::ports::template_source::TemplateSource;

const GITIGNORE_API_URL: &str = "https://www.toptal.com/developers/gitignore/api";

/// Live template source backed by the gitignore.io generator service.
pub struct GitignoreIo {
    client: Client,
}

impl GitignoreIo {
    /// Creates a new gitignore.io template source.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for GitignoreIo {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSource for GitignoreIo {
    fn fetch(&self, techs: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{GITIGNORE_API_URL}/{techs}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| format!("Failed to fetch gitignore template: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                format!("Failed to fetch gitignore template (status {})", status.as_u16()).into()
            );
        }
        Ok(response.text().map_err(|e| format!("Failed to read gitignore template: {e}"))?)
    }
}
