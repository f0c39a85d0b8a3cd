//! Gitignore-template port.

/// Fetches `.gitignore` templates for a set of technologies.
pub trait TemplateSource: Send + Sync {
    /// Fetches a template for a comma-separated technology list
    /// (e.g. `"python"` or `"rust,node"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or responds with a
    /// non-success status.
    fn fetch(&self, techs: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
