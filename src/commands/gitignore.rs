//! `gitprep gitignore` command.

use std::path::Path;

use crate::analyze;
use crate::context::ServiceContext;
use crate::gitignore;

/// Execute the `gitignore` command: detect the project's language,
/// offer it as the default technology list, and write `.gitignore`.
///
/// # Errors
///
/// Returns an error string if the project path is unusable, the
/// template cannot be fetched, or the file cannot be written.
pub fn run(ctx: &ServiceContext, path: &Path) -> Result<(), String> {
    let root = ctx
        .fs
        .canonicalize(path)
        .map_err(|_| format!("Project path {} does not exist.", path.display()))?;

    let detected = detect_techs(ctx, &root);
    ctx.diag.info(&format!("Detected main language: {detected}"));

    let answer = ctx
        .prompter
        .input(
            "Enter comma-separated technologies/tools for .gitignore (or press Enter to use \
             detected)",
            Some(&detected),
        )
        .map_err(|e| format!("Failed to read input: {e}"))?;
    let techs = answer.replace(' ', "").to_lowercase();

    ctx.diag.info(&format!("Fetching .gitignore for: {techs} ..."));
    gitignore::generate(ctx, &root, &techs)
}

/// Best-effort language detection; defaults to python when the project
/// cannot be analyzed.
pub(crate) fn detect_techs(ctx: &ServiceContext, root: &Path) -> String {
    analyze::analyze(ctx.fs.as_ref(), root)
        .map_or_else(|_| "python".to_string(), |d| d.language.to_string().to_lowercase())
}
