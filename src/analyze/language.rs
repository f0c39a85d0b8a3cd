//! Language and framework detection over a scanned file list.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The primary language of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// Python sources present.
    Python,
    /// JavaScript or TypeScript sources present.
    JavaScriptOrTypeScript,
    /// Java sources present.
    Java,
    /// C or C++ sources present.
    CCpp,
    /// Go sources present.
    Go,
    /// Rust sources present.
    Rust,
    /// Ruby sources present.
    Ruby,
    /// PHP sources present.
    Php,
    /// No recognized source extension found.
    Unknown,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Python => "Python",
            Self::JavaScriptOrTypeScript => "JavaScript/TypeScript",
            Self::Java => "Java",
            Self::CCpp => "C/C++",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Detection order: the first category with any matching extension wins,
/// regardless of how many files other categories have. The ranking is a
/// deliberate, order-stable choice rather than a frequency vote.
const DETECTION_ORDER: [(Language, &[&str]); 8] = [
    (Language::Python, &["py"]),
    (Language::JavaScriptOrTypeScript, &["js", "ts"]),
    (Language::Java, &["java"]),
    (Language::CCpp, &["cpp", "c"]),
    (Language::Go, &["go"]),
    (Language::Rust, &["rs"]),
    (Language::Ruby, &["rb"]),
    (Language::Php, &["php"]),
];

/// Detects the project language from the scanned file list.
#[must_use]
pub fn detect_language(files: &[String]) -> Language {
    let extensions: HashSet<String> = files
        .iter()
        .filter_map(|file| Path::new(file).extension())
        .filter_map(|ext| ext.to_str())
        .map(str::to_lowercase)
        .collect();

    for (language, candidates) in DETECTION_ORDER {
        if candidates.iter().any(|ext| extensions.contains(*ext)) {
            return language;
        }
    }
    Language::Unknown
}

/// Detects a framework from path substrings, for Python and JS/TS only.
///
/// Checks are case-insensitive and evaluated in a fixed order; the first
/// matching substring wins.
#[must_use]
pub fn detect_framework(files: &[String], language: Language) -> Option<String> {
    let rules: &[(&str, &str)] = match language {
        Language::Python => &[
            ("django", "Django"),
            ("flask", "Flask"),
            ("fastapi", "FastAPI"),
            ("requirements.txt", "Python"),
        ],
        Language::JavaScriptOrTypeScript => &[
            ("package.json", "Node.js"),
            ("react", "React"),
            ("vue", "Vue.js"),
            ("angular", "Angular"),
        ],
        _ => return None,
    };

    for (needle, framework) in rules {
        if files.iter().any(|file| file.to_lowercase().contains(needle)) {
            return Some((*framework).to_string());
        }
    }
    None
}
