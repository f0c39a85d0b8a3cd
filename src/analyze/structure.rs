//! One-level structural classification of a project's root entries.

use serde::{Deserialize, Serialize};

use crate::ports::filesystem::DirEntry;

/// Directory names treated as source roots.
const SOURCE_DIR_NAMES: [&str; 4] = ["src", "app", "lib", "source"];

/// Filename fragments marking configuration files.
const CONFIG_FRAGMENTS: [&str; 5] = [".json", ".yaml", ".yml", ".toml", ".ini"];

/// Filename fragments marking build artifacts and manifests.
const BUILD_FRAGMENTS: [&str; 3] = [".lock", ".spec", "build"];

/// Classified immediate children of the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStructure {
    /// Source directories (`src`, `app`, `lib`, `source`).
    pub src_dirs: Vec<String>,
    /// Files that look like configuration.
    pub config_files: Vec<String>,
    /// Files that look like build manifests or lockfiles.
    pub build_files: Vec<String>,
    /// Directories whose name mentions tests.
    pub test_dirs: Vec<String>,
}

/// Classifies the immediate children of the project root.
///
/// Only one level is examined. Categories are independent: an entry may
/// land in several of them.
#[must_use]
pub fn analyze_structure(entries: &[DirEntry]) -> ProjectStructure {
    let mut structure = ProjectStructure::default();

    for entry in entries {
        let lower = entry.name.to_lowercase();
        if entry.is_dir {
            if SOURCE_DIR_NAMES.contains(&entry.name.as_str()) {
                structure.src_dirs.push(entry.name.clone());
            }
            if lower.contains("test") {
                structure.test_dirs.push(entry.name.clone());
            }
        } else {
            if CONFIG_FRAGMENTS.iter().any(|fragment| lower.contains(fragment)) {
                structure.config_files.push(entry.name.clone());
            }
            if BUILD_FRAGMENTS.iter().any(|fragment| lower.contains(fragment)) {
                structure.build_files.push(entry.name.clone());
            }
        }
    }

    structure.src_dirs.sort();
    structure.config_files.sort();
    structure.build_files.sort();
    structure.test_dirs.sort();
    structure
}
