//! Dependency extraction from language manifests.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::analyze::language::Language;
use crate::ports::filesystem::FileSystem;

/// Maximum number of dependencies reported in a descriptor.
const MAX_DEPENDENCIES: usize = 10;

/// Subset of `package.json` consumed for dependency extraction.
#[derive(Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

/// Extracts up to [`MAX_DEPENDENCIES`] package names for the project.
///
/// Python: reads every scanned file whose path contains `requirements`
/// (case-insensitive) or ends in `.txt`, stripping version specifiers.
/// JS/TS: parses a root-level `package.json` and unions its
/// `dependencies` and `devDependencies` keys. A file that cannot be
/// read or parsed is skipped and extraction continues — the descriptor
/// is best-effort, never an error.
pub fn extract_dependencies(
    fs: &dyn FileSystem,
    root: &Path,
    files: &[String],
    language: Language,
) -> Vec<String> {
    let mut dependencies = Vec::new();

    match language {
        Language::Python => {
            for file in files
                .iter()
                .filter(|f| f.to_lowercase().contains("requirements") || f.ends_with(".txt"))
            {
                let Ok(contents) = fs.read_to_string(&root.join(file)) else {
                    continue;
                };
                for line in contents.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    dependencies.push(strip_version(line).to_string());
                }
            }
        }
        Language::JavaScriptOrTypeScript => {
            if files.iter().any(|f| f == "package.json") {
                if let Ok(contents) = fs.read_to_string(&root.join("package.json")) {
                    if let Ok(manifest) = serde_json::from_str::<PackageManifest>(&contents) {
                        dependencies.extend(manifest.dependencies.into_keys());
                        dependencies.extend(manifest.dev_dependencies.into_keys());
                    }
                }
            }
        }
        _ => {}
    }

    dedup_and_truncate(dependencies)
}

/// Takes the package name before the first `==`, `>=` or `<=`.
fn strip_version(line: &str) -> &str {
    let mut name = line;
    for separator in ["==", ">=", "<="] {
        if let Some(idx) = name.find(separator) {
            name = &name[..idx];
        }
    }
    name.trim()
}

/// Removes duplicates (keeping first occurrence) and caps the list.
fn dedup_and_truncate(dependencies: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> =
        dependencies.into_iter().filter(|dep| seen.insert(dep.clone())).collect();
    unique.truncate(MAX_DEPENDENCIES);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemFs;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn python_requirements_strip_versions() {
        let fs = MemFs::with_files(
            "/p",
            &[("requirements.txt", "flask==2.3.0\nrequests>=2.28\nnumpy<=1.26\n\n# comment\n")],
        );
        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["requirements.txt", "main.py"]),
            Language::Python,
        );
        assert_eq!(deps, ["flask", "requests", "numpy"]);
    }

    #[test]
    fn python_merges_all_requirement_files() {
        let fs = MemFs::with_files(
            "/p",
            &[("requirements.txt", "flask==1.0\n"), ("requirements-dev.txt", "pytest==7.0\nflask==1.0\n")],
        );
        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["requirements.txt", "requirements-dev.txt"]),
            Language::Python,
        );
        assert_eq!(deps, ["flask", "pytest"]);
    }

    #[test]
    fn result_is_deduplicated_and_capped_at_ten() {
        let manifest: String = (0..25).map(|i| format!("pkg{i:02}==1.0\npkg{i:02}==1.0\n")).collect();
        let fs = MemFs::new();
        fs.write(Path::new("/p/requirements.txt"), &manifest).unwrap();

        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["requirements.txt"]),
            Language::Python,
        );
        assert_eq!(deps.len(), 10);
        let unique: std::collections::HashSet<&String> = deps.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn unreadable_manifest_is_skipped() {
        let fs = MemFs::with_files(
            "/p",
            &[("requirements.txt", "flask==1.0\n"), ("requirements-ci.txt", "ignored==0\n")],
        );
        fs.poison(Path::new("/p/requirements-ci.txt"));

        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["requirements.txt", "requirements-ci.txt"]),
            Language::Python,
        );
        assert_eq!(deps, ["flask"]);
    }

    #[test]
    fn node_manifest_unions_dev_dependencies() {
        let fs = MemFs::with_files(
            "/p",
            &[(
                "package.json",
                r#"{"dependencies": {"react": "^18.0.0"}, "devDependencies": {"eslint": "^8.0.0"}}"#,
            )],
        );
        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["package.json", "src/index.js"]),
            Language::JavaScriptOrTypeScript,
        );
        assert!(deps.contains(&"react".to_string()));
        assert!(deps.contains(&"eslint".to_string()));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn malformed_package_json_yields_no_dependencies() {
        let fs = MemFs::with_files("/p", &[("package.json", "{ not json")]);
        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["package.json"]),
            Language::JavaScriptOrTypeScript,
        );
        assert!(deps.is_empty());
    }

    #[test]
    fn nested_package_json_is_ignored() {
        let fs =
            MemFs::with_files("/p", &[("web/package.json", r#"{"dependencies": {"vue": "3"}}"#)]);
        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["web/package.json"]),
            Language::JavaScriptOrTypeScript,
        );
        assert!(deps.is_empty());
    }

    #[test]
    fn other_languages_have_no_extraction() {
        let fs = MemFs::with_files("/p", &[("Cargo.toml", "[package]")]);
        let deps = extract_dependencies(
            &fs,
            Path::new("/p"),
            &paths(&["Cargo.toml", "src/main.rs"]),
            Language::Rust,
        );
        assert!(deps.is_empty());
    }
}
