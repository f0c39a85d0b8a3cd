//! `gitprep run` command: the full analyze → generate → deploy pipeline.

use std::path::Path;

use crate::analyze::{self, scan};
use crate::commands::gitignore::detect_techs;
use crate::context::ServiceContext;
use crate::deploy;
use crate::gitignore;
use crate::readme::{self, DocType};

/// Execute the `run` command.
///
/// Requires host credentials. Ensures the project's `.gitignore` covers
/// the mandatory patterns, generates and writes the README, then asks
/// for branch and visibility and deploys every scanned file.
///
/// # Errors
///
/// Returns an error string if the project path is unusable, credentials
/// are missing, or the deployment fails or is aborted.
pub fn run(ctx: &ServiceContext, path: &Path, doc_type: &str) -> Result<(), String> {
    let root = ctx
        .fs
        .canonicalize(path)
        .map_err(|_| format!("Project path {} does not exist.", path.display()))?;

    if ctx.host.is_none() {
        return Err("GitHub credentials not found. Please run setup first.".to_string());
    }

    // A stale or missing .gitignore gets refreshed before anything is
    // pushed; a fetch failure is announced but does not stop the run.
    if !gitignore::is_current(ctx.fs.as_ref(), &root) {
        ctx.diag.info("Ensuring .gitignore is present and up-to-date...");
        let techs = detect_techs(ctx, &root);
        if let Err(e) = gitignore::generate(ctx, &root, &techs) {
            ctx.diag.error(&e);
        }
    }

    let descriptor = analyze::analyze(ctx.fs.as_ref(), &root)?;
    let content = readme::generate(ctx, &descriptor, DocType::parse(doc_type));
    let readme_path = root.join("README.md");
    ctx.fs
        .write(&readme_path, &content)
        .map_err(|e| format!("Failed to write {}: {e}", readme_path.display()))?;
    ctx.diag.info(&format!("README.md generated at {}", readme_path.display()));

    let branches = ["main", "side"];
    let branch_choice = ctx
        .prompter
        .select("Branch to upload to", &branches)
        .map_err(|e| format!("Failed to read input: {e}"))?;
    let branch = branches[branch_choice];
    let private = ctx
        .prompter
        .confirm("Should the repository be private?", false)
        .map_err(|e| format!("Failed to read input: {e}"))?;

    // Re-scan so the freshly written README is part of the upload set.
    let files = scan::scan(ctx.fs.as_ref(), &root)?;
    let outcome = deploy::deploy(ctx, &descriptor, &files, &root, branch, private)?;

    ctx.diag.info(&format!(
        "Project deployed to GitHub! ({} created, {} updated, {} binary, {} skipped)",
        outcome.created, outcome.updated, outcome.binaries, outcome.skipped
    ));
    Ok(())
}
