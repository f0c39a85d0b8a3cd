//! File classification: exclusion, binary detection, size limits.
//!
//! Pure functions with no I/O; the scanner and the deployment
//! orchestrator both build on these decisions.

use std::path::Path;

/// Directory and file names never scanned or uploaded.
pub const EXCLUDED_NAMES: [&str; 6] =
    [".git", "node_modules", "__pycache__", "venv", ".DS_Store", ".mypy_cache"];

/// Upper bound for uploadable files: 5 MB.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Returns `true` when the path must not be scanned or uploaded.
///
/// A path is excluded when any segment equals one of
/// [`EXCLUDED_NAMES`] or when its leaf name starts with `.`.
#[must_use]
pub fn is_excluded(path: &Path) -> bool {
    let mut last = None;
    for component in path.components() {
        let Some(name) = component.as_os_str().to_str() else { continue };
        if EXCLUDED_NAMES.contains(&name) {
            return true;
        }
        last = Some(name);
    }
    last.is_some_and(|name| name.starts_with('.'))
}

/// Returns `true` when the buffer holds binary (non-text) content.
///
/// A buffer is binary when it contains any byte outside the printable
/// allow-set: tab, newline, form-feed, carriage-return, escape, and
/// 0x20–0xFF excluding DEL. Empty buffers are text.
#[must_use]
pub fn is_binary(content: &[u8]) -> bool {
    content.iter().any(|&byte| {
        !matches!(byte, b'\t' | b'\n' | 0x0C | b'\r' | 0x1B | 0x20..=0x7E | 0x80..=0xFF)
    })
}

/// Returns `true` when a file of `len` bytes exceeds the upload limit.
#[must_use]
pub fn is_oversize(len: u64) -> bool {
    len > MAX_FILE_SIZE
}
