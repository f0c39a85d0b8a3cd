//! Project inference engine.
//!
//! Scans a project directory and derives an immutable
//! [`ProjectDescriptor`]: language, framework, dependencies, structure,
//! and a handful of boolean facts. The descriptor is the shared contract
//! between document generation and deployment; nothing mutates it after
//! construction.

pub mod classify;
pub mod deps;
pub mod language;
pub mod scan;
pub mod structure;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ports::filesystem::FileSystem;
pub use language::Language;
pub use structure::ProjectStructure;

/// Immutable snapshot of everything inferred about a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Directory base name.
    pub name: String,
    /// Human-readable phrase derived from the name.
    pub description: String,
    /// Detected primary language.
    pub language: Language,
    /// Detected framework, when language heuristics matched.
    pub framework: Option<String>,
    /// Up to ten deduplicated package names, versions stripped.
    pub dependencies: Vec<String>,
    /// Every non-excluded file, relative to the project root.
    pub files: Vec<String>,
    /// Classified immediate children of the root.
    pub structure: ProjectStructure,
    /// Any path mentions `test` or `spec`.
    pub has_tests: bool,
    /// Any path mentions `readme` or `docs`.
    pub has_docs: bool,
    /// Any path mentions `license`.
    pub has_license: bool,
    /// A language-appropriate dependency manifest is present.
    pub has_requirements: bool,
}

/// Analyzes the project rooted at `root` and builds its descriptor.
///
/// Individual manifest read failures are absorbed by dependency
/// extraction; only an unusable root (or an unlistable directory) fails
/// the analysis.
///
/// # Errors
///
/// Returns an error if `root` does not exist, is not a directory, or
/// cannot be traversed.
pub fn analyze(fs: &dyn FileSystem, root: &Path) -> Result<ProjectDescriptor, String> {
    let files = scan::scan(fs, root)?;
    let language = language::detect_language(&files);
    let framework = language::detect_framework(&files, language);
    let dependencies = deps::extract_dependencies(fs, root, &files, language);

    let entries = fs
        .list_dir(root)
        .map_err(|e| format!("Failed to list {}: {e}", root.display()))?;
    let structure = structure::analyze_structure(&entries);

    let name = project_name(root);
    Ok(ProjectDescriptor {
        description: describe(&name),
        has_tests: any_path_contains(&files, &["test", "spec"]),
        has_docs: any_path_contains(&files, &["readme", "docs"]),
        has_license: any_path_contains(&files, &["license"]),
        has_requirements: has_requirements(&files, language),
        name,
        language,
        framework,
        dependencies,
        files,
        structure,
    })
}

/// The project's name: the root directory's base name.
fn project_name(root: &Path) -> String {
    root.file_name()
        .map_or_else(|| root.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Derives the human-readable description from the directory name.
fn describe(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ").to_lowercase();
    format!("A {spaced} project")
}

/// Returns `true` when any path contains one of the needles,
/// case-insensitively.
fn any_path_contains(files: &[String], needles: &[&str]) -> bool {
    files.iter().any(|file| {
        let lower = file.to_lowercase();
        needles.iter().any(|needle| lower.contains(needle))
    })
}

/// Whether a language-appropriate dependency manifest exists.
fn has_requirements(files: &[String], language: Language) -> bool {
    match language {
        Language::Python => files
            .iter()
            .any(|f| f.to_lowercase().contains("requirements") || f.ends_with(".txt")),
        Language::JavaScriptOrTypeScript => files.iter().any(|f| f == "package.json"),
        _ => false,
    }
}
