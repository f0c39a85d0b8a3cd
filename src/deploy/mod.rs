//! Deployment orchestrator: stages local files against a remote
//! repository through the `RepoHost` port.
//!
//! Text files are created or updated individually; binary files are
//! staged as blobs and committed once, after all text uploads. Oversized
//! files are skipped. Per-file failures are resolved interactively
//! (retry / skip / abort).

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::analyze::classify;
use crate::analyze::ProjectDescriptor;
use crate::context::ServiceContext;
use crate::ports::repo_host::{BranchLookup, RepoHandle, RepoHost, TreeEntry};

/// Counters describing what a deployment did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Text files created on the remote.
    pub created: usize,
    /// Text files updated on the remote.
    pub updated: usize,
    /// Binary files committed as blobs.
    pub binaries: usize,
    /// Files skipped (oversized or by user decision).
    pub skipped: usize,
}

/// What the user chose after a per-file failure.
enum Decision {
    Retry,
    Skip,
    Abort,
}

/// Derives the remote repository name from a project name.
///
/// Spaces and underscores become hyphens; anything that is not
/// alphanumeric, hyphen, or underscore is stripped.
#[must_use]
pub fn repo_name(project_name: &str) -> String {
    project_name
        .replace([' ', '_'], "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Deploys the project's files to the remote host.
///
/// `files` is the scanned upload set, relative to `root`. The target
/// repository is derived from the descriptor and created when absent.
///
/// # Errors
///
/// Returns an error when no host is configured, the repository cannot be
/// prepared, an empty repository has no README to initialize with, or
/// the user aborts the upload.
pub fn deploy(
    ctx: &ServiceContext,
    descriptor: &ProjectDescriptor,
    files: &[String],
    root: &Path,
    branch: &str,
    private: bool,
) -> Result<DeployOutcome, String> {
    let host = ctx
        .host
        .as_deref()
        .ok_or_else(|| "GitHub credentials not configured. Run setup first.".to_string())?;

    let name = repo_name(&descriptor.name);
    let repo = host
        .get_or_create_repo(&name, &descriptor.description, private)
        .map_err(|e| format!("Failed to get or create repository {name}: {e}"))?;
    ctx.diag.info(&format!("Using repository {}/{}", repo.owner, repo.name));

    let mut outcome = DeployOutcome::default();

    // Size filtering happens before anything touches the remote; each
    // oversized file is reported exactly once.
    let mut pending: Vec<&str> = Vec::new();
    for file in files {
        match ctx.fs.file_size(&root.join(file)) {
            Ok(size) if classify::is_oversize(size) => {
                ctx.diag.warn(&format!("Skipping large file: {file}"));
                outcome.skipped += 1;
            }
            Ok(_) => pending.push(file.as_str()),
            Err(e) => {
                ctx.diag.warn(&format!("Skipping unreadable file {file}: {e}"));
                outcome.skipped += 1;
            }
        }
    }

    let mut remaining = ensure_branch(ctx, host, &repo, branch, &pending, root, &mut outcome)?;

    let mut staged: Vec<TreeEntry> = Vec::new();
    while let Some(file) = remaining.first().copied() {
        match upload_file(ctx, host, &repo, branch, root, file, &mut staged, &mut outcome) {
            Ok(()) => {
                remaining.remove(0);
            }
            Err(e) => {
                ctx.diag.error(&format!("Error uploading {file}: {e}"));
                match ask_decision(ctx)? {
                    Decision::Retry => {}
                    Decision::Skip => {
                        outcome.skipped += 1;
                        remaining.remove(0);
                    }
                    Decision::Abort => {
                        ctx.diag.error("Aborted upload process.");
                        return Err("Upload aborted".to_string());
                    }
                }
            }
        }
    }

    // All staged blobs land in one tree + commit, never one commit per
    // binary file.
    if !staged.is_empty() {
        match commit_staged(host, &repo, branch, &staged) {
            Ok(()) => {
                outcome.binaries = staged.len();
                ctx.diag.info(&format!("Committed binary files to branch {branch}."));
            }
            Err(e) => ctx.diag.error(&format!("Error committing binary files: {e}")),
        }
    }

    Ok(outcome)
}

/// Resolves the target branch, handling the empty-repository and
/// missing-branch special cases. Returns the files still to upload.
fn ensure_branch<'a>(
    ctx: &ServiceContext,
    host: &dyn RepoHost,
    repo: &RepoHandle,
    branch: &str,
    pending: &[&'a str],
    root: &Path,
    outcome: &mut DeployOutcome,
) -> Result<Vec<&'a str>, String> {
    let lookup =
        host.branch_tip(repo, branch).map_err(|e| format!("Failed to look up branch: {e}"))?;

    match lookup {
        BranchLookup::Tip(_) => Ok(pending.to_vec()),
        BranchLookup::EmptyRepo => {
            // The README initializes the repository; everything else
            // follows against the branch that commit creates.
            let readme = pending
                .iter()
                .copied()
                .find(|file| file.to_lowercase() == "readme.md")
                .ok_or_else(|| {
                    "Cannot initialize empty repository: README.md not found in project."
                        .to_string()
                })?;
            let content = ctx
                .fs
                .read_to_string(&root.join(readme))
                .map_err(|e| format!("Failed to read {readme}: {e}"))?;
            host.create_file(repo, readme, &content, &format!("Initial commit: {readme}"), branch)
                .map_err(|e| format!("Failed to initialize repository: {e}"))?;
            ctx.diag
                .info(&format!("Initialized repository with {readme} on branch {branch}."));
            outcome.created += 1;
            Ok(pending.iter().copied().filter(|file| *file != readme).collect())
        }
        BranchLookup::Missing => {
            let base = match host
                .branch_tip(repo, "main")
                .map_err(|e| format!("Failed to look up branch: {e}"))?
            {
                BranchLookup::Tip(sha) => sha,
                _ => match host
                    .branch_tip(repo, &repo.default_branch)
                    .map_err(|e| format!("Failed to look up branch: {e}"))?
                {
                    BranchLookup::Tip(sha) => sha,
                    _ => {
                        return Err(format!(
                            "No base branch found to create {branch} from"
                        ));
                    }
                },
            };
            host.create_branch(repo, branch, &base)
                .map_err(|e| format!("Failed to create branch {branch}: {e}"))?;
            ctx.diag.info(&format!("Created branch {branch}."));
            Ok(pending.to_vec())
        }
    }
}

/// Uploads one file: binaries are staged as blobs, text files are
/// created or updated in place.
#[allow(clippy::too_many_arguments)]
fn upload_file(
    ctx: &ServiceContext,
    host: &dyn RepoHost,
    repo: &RepoHandle,
    branch: &str,
    root: &Path,
    file: &str,
    staged: &mut Vec<TreeEntry>,
    outcome: &mut DeployOutcome,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let bytes = ctx.fs.read(&root.join(file))?;

    if classify::is_binary(&bytes) {
        let sha = host.create_blob(repo, &BASE64.encode(&bytes))?;
        staged.push(TreeEntry { path: file.to_string(), sha });
        ctx.diag.info(&format!("Prepared binary file for upload: {file}"));
        return Ok(());
    }

    let content = String::from_utf8_lossy(&bytes);
    match host.file_sha(repo, file, branch)? {
        Some(sha) => {
            host.update_file(repo, file, &content, &sha, &format!("Update {file}"), branch)?;
            ctx.diag.info(&format!("Updated text file: {file}"));
            outcome.updated += 1;
        }
        None => {
            host.create_file(repo, file, &content, &format!("Add {file}"), branch)?;
            ctx.diag.info(&format!("Uploaded text file: {file}"));
            outcome.created += 1;
        }
    }
    Ok(())
}

/// Asks the user how to proceed after a failed upload.
fn ask_decision(ctx: &ServiceContext) -> Result<Decision, String> {
    let choice = ctx
        .prompter
        .select("Retry (r), Skip (s), or Abort (a)?", &["retry", "skip", "abort"])
        .map_err(|e| format!("Failed to read decision: {e}"))?;
    Ok(match choice {
        0 => Decision::Retry,
        1 => Decision::Skip,
        _ => Decision::Abort,
    })
}

/// Commits all staged blobs as a single tree on top of the branch tip.
fn commit_staged(
    host: &dyn RepoHost,
    repo: &RepoHandle,
    branch: &str,
    staged: &[TreeEntry],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Re-fetch the tip: text uploads moved the branch since the probe.
    let parent = match host.branch_tip(repo, branch)? {
        BranchLookup::Tip(sha) => sha,
        _ => return Err(format!("Branch {branch} disappeared during upload").into()),
    };
    let commit = host.commit_tree(repo, staged, &parent, "Add/update binary files")?;
    host.update_branch_ref(repo, branch, &commit)?;
    Ok(())
}
