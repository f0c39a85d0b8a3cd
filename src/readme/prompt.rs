//! Prompt construction for provider-backed README generation.

use std::fmt::Write as _;

use crate::analyze::ProjectDescriptor;
use crate::readme::DocType;

/// Standing instructions sent as the system prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert technical writer and open source \
documentation specialist. Your job is to create clear, comprehensive, and engaging README.md \
files for software projects. You follow best practices for open source documentation, ensuring \
the README is well-structured, easy to navigate, and provides all essential information for \
users and contributors. You highlight the project's unique features, architecture, setup \
instructions, usage examples, contribution guidelines, and licensing. Always use professional \
Markdown formatting, include badges if relevant, and tailor the content to the project's \
language and framework. If the project is a library or API, include usage examples and API \
reference. If the project is an application, include screenshots or demo instructions if \
possible. Be concise but thorough, and make the README welcoming for both new users and \
contributors.";

/// Per-type instruction block appended to the user prompt.
#[must_use]
pub fn type_instructions(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::Simple => {
            "Write a concise README.md for this project. Include: project title, a short \
             description, installation steps, basic usage example, and license section. Use \
             clear Markdown formatting and bullet points where appropriate."
        }
        DocType::Advanced => {
            "Write a comprehensive, professional README.md for this project. Include the \
             following sections: project title, badges (if relevant), detailed description, \
             key features, architecture overview (with diagram if possible), installation \
             instructions, configuration, usage examples, API reference (if applicable), \
             contribution guidelines, code of conduct, FAQ, and license. Use advanced Markdown \
             formatting, tables, and code blocks where appropriate. Highlight what makes this \
             project unique and provide links to documentation or related resources."
        }
        DocType::Installation => {
            "Write a README.md focused on installation and setup. Include: project title, \
             description, prerequisites, detailed installation steps for different platforms \
             (if relevant), configuration instructions, troubleshooting tips, and license. Use \
             step-by-step instructions, code blocks, and highlight common pitfalls."
        }
    }
}

/// Builds the user prompt embedding the project descriptor.
#[must_use]
pub fn build_user_prompt(descriptor: &ProjectDescriptor, doc_type: DocType) -> String {
    let framework = descriptor.framework.as_deref().unwrap_or("None");
    let dependencies: Vec<&str> =
        descriptor.dependencies.iter().take(5).map(String::as_str).collect();
    let key_files: Vec<&str> = descriptor.files.iter().take(10).map(String::as_str).collect();

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Project Name: {}", descriptor.name);
    let _ = writeln!(prompt, "Description: {}", descriptor.description);
    let _ = writeln!(prompt, "Language: {}", descriptor.language);
    let _ = writeln!(prompt, "Framework: {framework}");
    let _ = writeln!(prompt, "Dependencies: {}", dependencies.join(", "));
    let _ = writeln!(prompt, "Has Tests: {}", descriptor.has_tests);
    let _ = writeln!(prompt, "Has Documentation: {}", descriptor.has_docs);
    let _ = writeln!(prompt, "Has License: {}", descriptor.has_license);
    prompt.push('\n');
    prompt.push_str("Project Structure:\n");
    let _ = writeln!(prompt, "- Source directories: {:?}", descriptor.structure.src_dirs);
    let _ = writeln!(prompt, "- Configuration files: {:?}", descriptor.structure.config_files);
    let _ = writeln!(prompt, "- Test directories: {:?}", descriptor.structure.test_dirs);
    prompt.push('\n');
    let _ = writeln!(prompt, "Key Files: {key_files:?}");
    prompt.push('\n');
    prompt.push_str("Requirements:\n");
    prompt.push_str(type_instructions(doc_type));
    prompt.push('\n');
    prompt
}
