//! Project scanner: walks a directory tree applying exclusion rules.

use std::collections::VecDeque;
use std::path::Path;

use crate::analyze::classify::EXCLUDED_NAMES;
use crate::ports::filesystem::FileSystem;

/// File extensions never included in a scan.
const EXCLUDED_EXTENSIONS: [&str; 3] = [".pyc", ".log", ".tmp"];

/// Walks the tree under `root` and returns every includable file as a
/// `/`-separated path relative to `root`.
///
/// Excluded and hidden directories are pruned before descending, so the
/// traversal never enters them. Hidden files and files with an excluded
/// extension are dropped.
///
/// # Errors
///
/// Returns an error if `root` does not exist or is not a directory, or
/// if a directory inside the tree cannot be listed.
pub fn scan(fs: &dyn FileSystem, root: &Path) -> Result<Vec<String>, String> {
    if !fs.is_dir(root) {
        return Err(format!(
            "Project path {} does not exist or is not a directory",
            root.display()
        ));
    }

    let mut files = Vec::new();
    let mut pending: VecDeque<String> = VecDeque::new();
    pending.push_back(String::new());

    while let Some(rel_dir) = pending.pop_front() {
        let abs_dir = if rel_dir.is_empty() { root.to_path_buf() } else { root.join(&rel_dir) };
        let entries = fs
            .list_dir(&abs_dir)
            .map_err(|e| format!("Failed to list {}: {e}", abs_dir.display()))?;

        for entry in entries {
            let rel_path = if rel_dir.is_empty() {
                entry.name.clone()
            } else {
                format!("{rel_dir}/{}", entry.name)
            };
            if entry.is_dir {
                if !prune_dir(&entry.name) {
                    pending.push_back(rel_path);
                }
            } else if include_file(&entry.name) {
                files.push(rel_path);
            }
        }
    }

    Ok(files)
}

/// Returns `true` when a directory must not be descended into.
fn prune_dir(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_NAMES.contains(&name)
}

/// Returns `true` when a file should appear in the scan result.
fn include_file(name: &str) -> bool {
    !name.starts_with('.') && !EXCLUDED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
