//! `gitprep readme` command.

use std::path::Path;

use crate::analyze;
use crate::context::ServiceContext;
use crate::readme::{self, DocType};

/// Execute the `readme` command: analyze the project and write its
/// README.md.
///
/// # Errors
///
/// Returns an error string if the project path is unusable or the
/// README cannot be written. Provider failures are not errors; they
/// degrade to template generation.
pub fn run(ctx: &ServiceContext, path: &Path, doc_type: &str) -> Result<(), String> {
    let root = ctx
        .fs
        .canonicalize(path)
        .map_err(|_| format!("Project path {} does not exist.", path.display()))?;

    let descriptor = analyze::analyze(ctx.fs.as_ref(), &root)?;
    let content = readme::generate(ctx, &descriptor, DocType::parse(doc_type));

    let readme_path = root.join("README.md");
    ctx.fs
        .write(&readme_path, &content)
        .map_err(|e| format!("Failed to write {}: {e}", readme_path.display()))?;
    ctx.diag.info(&format!("README.md generated at {}", readme_path.display()));
    Ok(())
}
