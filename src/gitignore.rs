//! Gitignore generation with mandatory ignore patterns.
//!
//! Templates come from the `TemplateSource` port; regardless of what the
//! service returns, a fixed set of patterns protecting credentials and
//! local environments is always present in the written file.

use std::path::Path;

use crate::context::ServiceContext;
use crate::ports::filesystem::FileSystem;

/// Patterns that every generated `.gitignore` must contain.
pub const MANDATORY_PATTERNS: [&str; 5] =
    ["mcp_client.config", ".env", "*.secret", ".venv", "node_modules"];

/// Returns `true` when the project's `.gitignore` exists and already
/// covers every mandatory pattern.
#[must_use]
pub fn is_current(fs: &dyn FileSystem, root: &Path) -> bool {
    let path = root.join(".gitignore");
    if !fs.exists(&path) {
        return false;
    }
    match fs.read_to_string(&path) {
        Ok(content) => MANDATORY_PATTERNS.iter().all(|pattern| content.contains(pattern)),
        Err(_) => false,
    }
}

/// Appends any missing mandatory patterns to a fetched template.
#[must_use]
pub fn with_mandatory_patterns(template: &str) -> String {
    let mut content = template.trim_end().to_string();
    if !content.contains(MANDATORY_PATTERNS[0]) {
        content.push_str("\n# gitprep config file\n");
        content.push_str(MANDATORY_PATTERNS[0]);
    }
    for pattern in &MANDATORY_PATTERNS[1..] {
        if !content.contains(pattern) {
            content.push('\n');
            content.push_str(pattern);
        }
    }
    content.push('\n');
    content
}

/// Fetches a template for `techs` and writes the project's `.gitignore`.
///
/// # Errors
///
/// Returns an error if the template cannot be fetched or the file cannot
/// be written.
pub fn generate(ctx: &ServiceContext, root: &Path, techs: &str) -> Result<(), String> {
    let template = ctx
        .templates
        .fetch(techs)
        .map_err(|e| format!("Failed to fetch .gitignore template: {e}"))?;
    let content = with_mandatory_patterns(&template);
    let path = root.join(".gitignore");
    ctx.fs
        .write(&path, &content)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    ctx.diag.info(&format!(".gitignore created at {}", path.display()));
    Ok(())
}
