//! Deterministic README templates.
//!
//! Pure string assembly over a [`ProjectDescriptor`]: no I/O, no
//! external calls, cannot fail. This is the guaranteed terminal
//! fallback for the whole generation pipeline.

use std::fmt::Write as _;

use crate::analyze::{Language, ProjectDescriptor};
use crate::readme::DocType;

/// Renders the template for the requested document type.
#[must_use]
pub fn render(descriptor: &ProjectDescriptor, doc_type: DocType) -> String {
    match doc_type {
        DocType::Simple => simple(descriptor),
        DocType::Installation => installation(descriptor),
        DocType::Advanced => advanced(descriptor),
    }
}

/// Install command for the project's language.
#[must_use]
pub fn install_command(language: Language) -> &'static str {
    match language {
        Language::Python => "pip install -r requirements.txt",
        Language::JavaScriptOrTypeScript => "npm install",
        _ => "# Install dependencies based on your project type",
    }
}

/// Run command for the project's language.
#[must_use]
pub fn run_command(language: Language) -> &'static str {
    match language {
        Language::Python => "python main.py",
        Language::JavaScriptOrTypeScript => "npm start",
        _ => "# Run the application based on your project type",
    }
}

/// Test command for the project's language.
#[must_use]
pub fn test_command(language: Language) -> &'static str {
    match language {
        Language::Python => "python -m pytest",
        Language::JavaScriptOrTypeScript => "npm test",
        _ => "# Run tests based on your project type",
    }
}

/// Development-install command for the project's language.
#[must_use]
pub fn dev_install_command(language: Language) -> &'static str {
    match language {
        Language::Python => "pip install -r requirements-dev.txt",
        Language::JavaScriptOrTypeScript => "npm install --include=dev",
        _ => install_command(language),
    }
}

/// Command used to verify an installation: the test suite when one
/// exists, otherwise the run command asked for its version.
#[must_use]
pub fn verify_command(descriptor: &ProjectDescriptor) -> String {
    if descriptor.has_tests {
        test_command(descriptor.language).to_string()
    } else {
        format!("{} --version", run_command(descriptor.language))
    }
}

/// Icon shown next to the language in the tech-stack summary.
#[must_use]
pub fn language_icon(language: Language) -> &'static str {
    match language {
        Language::Python => "\u{1F40D}",
        Language::JavaScriptOrTypeScript => "\u{26A1}\u{FE0F}",
        Language::Java => "\u{2615}",
        Language::CCpp => "\u{1F4BB}",
        Language::Go => "\u{1F9A6}",
        Language::Rust => "\u{1F980}",
        Language::Ruby => "\u{1F48E}",
        Language::Php => "\u{1F418}",
        Language::Unknown => "\u{2753}",
    }
}

/// Configuration section: found config files, or the env-var fallback.
fn configuration_section(descriptor: &ProjectDescriptor) -> String {
    if descriptor.structure.config_files.is_empty() {
        return "\nConfiguration can be done through environment variables or by editing the \
                source code.\n"
            .to_string();
    }
    let mut section = String::from("\nThe project uses the following configuration files:\n");
    for file in &descriptor.structure.config_files {
        let _ = writeln!(section, "- `{file}`");
    }
    section.push_str("\nEdit these files to customize the application behavior.\n");
    section
}

fn simple(descriptor: &ProjectDescriptor) -> String {
    let name = &descriptor.name;
    let description = &descriptor.description;
    let install = install_command(descriptor.language);
    let run = run_command(descriptor.language);

    format!(
        "# {name}\n\n\
         {description}\n\n\
         ## Installation\n\n\
         ```bash\n\
         # Clone the repository\n\
         git clone <repository-url>\n\
         cd {name}\n\n\
         # Install dependencies\n\
         {install}\n\
         ```\n\n\
         ## Usage\n\n\
         ```bash\n\
         # Run the project\n\
         {run}\n\
         ```\n\n\
         ## License\n\n\
         This project is licensed under the MIT License.\n"
    )
}

fn installation(descriptor: &ProjectDescriptor) -> String {
    let name = &descriptor.name;
    let description = &descriptor.description;
    let language = descriptor.language;
    let install = install_command(language);
    let verify = verify_command(descriptor);
    let configuration = configuration_section(descriptor);
    let framework_line = descriptor
        .framework
        .as_ref()
        .map(|framework| format!("- {framework}\n"))
        .unwrap_or_default();

    format!(
        "# {name}\n\n\
         {description}\n\n\
         ## Prerequisites\n\n\
         - {language}\n\
         {framework_line}\n\
         ## Installation\n\n\
         ### Step 1: Clone the Repository\n\n\
         ```bash\n\
         git clone <repository-url>\n\
         cd {name}\n\
         ```\n\n\
         ### Step 2: Install Dependencies\n\n\
         ```bash\n\
         {install}\n\
         ```\n\n\
         ### Step 3: Configuration\n\
         {configuration}\n\
         ### Step 4: Verify Installation\n\n\
         ```bash\n\
         {verify}\n\
         ```\n\n\
         ## Troubleshooting\n\n\
         ### Common Issues\n\n\
         1. **Dependency conflicts**: Try updating your package manager\n\
         2. **Permission errors**: Use `sudo` for system-wide installation\n\
         3. **Path issues**: Ensure the project is in your PATH\n\n\
         ### Getting Help\n\n\
         If you encounter issues:\n\
         1. Check the [Issues](link-to-issues) page\n\
         2. Review the documentation\n\
         3. Contact the maintainers\n\n\
         ## License\n\n\
         This project is licensed under the MIT License.\n"
    )
}

fn advanced(descriptor: &ProjectDescriptor) -> String {
    let name = &descriptor.name;
    let description = &descriptor.description;
    let language = descriptor.language;
    let icon = language_icon(language);
    let install = install_command(language);
    let run = run_command(language);
    let test = test_command(language);
    let dev_install = dev_install_command(language);
    let configuration = configuration_section(descriptor);

    let language_badge = language.to_string().replace(' ', "%20");
    let framework_suffix = descriptor
        .framework
        .as_ref()
        .filter(|framework| framework.as_str() != language.to_string())
        .map(|framework| format!(" | {framework}"))
        .unwrap_or_default();

    let mut tech_stack = format!("{icon} {language}{framework_suffix}");
    if !descriptor.dependencies.is_empty() {
        let shown: Vec<&str> =
            descriptor.dependencies.iter().take(5).map(String::as_str).collect();
        let _ = write!(tech_stack, " | {}", shown.join(", "));
    }

    let framework_feature = descriptor
        .framework
        .as_ref()
        .map(|framework| {
            format!(
                "- **{framework} Integration**: Leverages {framework} for enhanced \
                 functionality\n"
            )
        })
        .unwrap_or_default();
    let testing_feature = if descriptor.has_tests {
        "Includes unit and integration tests"
    } else {
        "Test coverage planned"
    };
    let docs_feature = if descriptor.has_docs {
        "Complete documentation included"
    } else {
        "Documentation in development"
    };

    format!(
        "# {name}\n\n\
         ![License](https://img.shields.io/badge/license-MIT-green.svg)\n\
         ![Language](https://img.shields.io/badge/language-{language_badge}-blue.svg)\n\n\
         {description}\n\n\
         ## \u{1F680} Table of Contents\n\
         - [Features](#features)\n\
         - [Getting Started](#getting-started)\n\
         - [Installation](#installation)\n\
         - [Usage](#usage)\n\
         - [Configuration](#configuration)\n\
         - [Tech Stack](#tech-stack)\n\
         - [Screenshots](#screenshots)\n\
         - [API Reference](#api-reference)\n\
         - [Contributing](#contributing)\n\
         - [Contact](#contact)\n\
         - [License](#license)\n\n\
         ## \u{2728} Features\n\
         - **Modern {language}**: Built with the latest {language} features\n\
         {framework_feature}\
         - **Comprehensive Testing**: {testing_feature}\n\
         - **Documentation**: {docs_feature}\n\n\
         ## \u{1F3C1} Getting Started\n\n\
         Follow these steps to get your development environment set up:\n\n\
         1. **Clone the repository**\n\
         \x20  ```bash\n\
         \x20  git clone <repository-url>\n\
         \x20  cd {name}\n\
         \x20  ```\n\
         2. **Install dependencies**\n\
         \x20  ```bash\n\
         \x20  {install}\n\
         \x20  ```\n\
         3. **Run the application**\n\
         \x20  ```bash\n\
         \x20  {run}\n\
         \x20  ```\n\n\
         ## \u{2699}\u{FE0F} Installation\n\n\
         ### Requirements\n\
         - {icon} {language}{framework_suffix}\n\n\
         ### Quick Start\n\
         ```bash\n\
         # Clone the repository\n\
         git clone <repository-url>\n\
         cd {name}\n\n\
         # Install dependencies\n\
         {install}\n\n\
         # Run the application\n\
         {run}\n\
         ```\n\n\
         ## \u{1F6E0}\u{FE0F} Usage\n\n\
         ### Basic Usage\n\
         ```bash\n\
         # Basic usage\n\
         {run}\n\n\
         # With options\n\
         {run} --help\n\
         ```\n\n\
         ### Advanced Configuration\n\
         {configuration}\n\
         ## \u{1F9F0} Tech Stack\n\
         - {tech_stack}\n\n\
         ## \u{1F4F8} Screenshots\n\
         Add screenshots here:\n\
         ```\n\
         ![Screenshot 1](link-to-screenshot-1)\n\
         ![Screenshot 2](link-to-screenshot-2)\n\
         ```\n\n\
         ## \u{1F4DA} API Reference\n\n\
         ### Core Functions\n\n\
         - `main()`: Entry point of the application\n\
         - `config()`: Load configuration settings\n\
         - `run()`: Execute the main application logic\n\n\
         For detailed API documentation, please refer to the source code or generated \
         documentation.\n\n\
         ## \u{1F91D} Contributing\n\
         We welcome contributions! Please see our [Contributing Guide](CONTRIBUTING.md) for \
         details.\n\n\
         ### Development Setup\n\
         ```bash\n\
         # Clone the repository\n\
         git clone <repository-url>\n\
         cd {name}\n\n\
         # Install development dependencies\n\
         {dev_install}\n\n\
         # Run tests\n\
         {test}\n\
         ```\n\n\
         ## \u{1F4EC} Contact\n\
         For questions, suggestions, or support, please open an issue or contact the \
         maintainers.\n\n\
         ## \u{1F4DD} License\n\
         This project is licensed under the MIT License - see the [LICENSE](LICENSE) file for \
         details.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::ProjectStructure;

    fn python_descriptor() -> ProjectDescriptor {
        ProjectDescriptor {
            name: "my-cool-app".into(),
            description: "A my cool app project".into(),
            language: Language::Python,
            framework: None,
            dependencies: vec![],
            files: vec!["main.py".into()],
            structure: ProjectStructure::default(),
            has_tests: false,
            has_docs: false,
            has_license: false,
            has_requirements: true,
        }
    }

    #[test]
    fn simple_template_contains_required_parts() {
        let text = render(&python_descriptor(), DocType::Simple);
        assert!(text.contains("# my-cool-app"));
        assert!(text.contains("pip install -r requirements.txt"));
        assert!(text.contains("python main.py"));
        assert!(text.contains("MIT License"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let descriptor = python_descriptor();
        for doc_type in [DocType::Simple, DocType::Installation, DocType::Advanced] {
            assert_eq!(render(&descriptor, doc_type), render(&descriptor, doc_type));
        }
    }

    #[test]
    fn verify_command_prefers_tests() {
        let mut descriptor = python_descriptor();
        assert_eq!(verify_command(&descriptor), "python main.py --version");
        descriptor.has_tests = true;
        assert_eq!(verify_command(&descriptor), "python -m pytest");
    }

    #[test]
    fn installation_template_lists_config_files() {
        let mut descriptor = python_descriptor();
        descriptor.structure.config_files = vec!["config.yaml".into(), "settings.toml".into()];
        let text = render(&descriptor, DocType::Installation);
        assert!(text.contains("- `config.yaml`"));
        assert!(text.contains("- `settings.toml`"));
        assert!(!text.contains("environment variables"));
    }

    #[test]
    fn installation_template_falls_back_to_env_vars() {
        let text = render(&python_descriptor(), DocType::Installation);
        assert!(text.contains("environment variables"));
        assert!(text.contains("### Step 4: Verify Installation"));
        assert!(text.contains("python main.py --version"));
    }

    #[test]
    fn advanced_template_mentions_framework_and_deps() {
        let mut descriptor = python_descriptor();
        descriptor.framework = Some("Flask".into());
        descriptor.dependencies =
            vec!["flask".into(), "requests".into(), "click".into(), "rich".into(), "sqlalchemy".into(), "extra".into()];
        let text = render(&descriptor, DocType::Advanced);

        assert!(text.contains("**Flask Integration**"));
        assert!(text.contains("\u{1F40D} Python | Flask | flask, requests, click, rich, sqlalchemy"));
        // Only the first five dependencies make the tech stack.
        assert!(!text.contains("extra"));
        assert!(text.contains("- [Features](#features)"));
    }

    #[test]
    fn advanced_template_skips_framework_equal_to_language() {
        let mut descriptor = python_descriptor();
        descriptor.framework = Some("Python".into());
        let text = render(&descriptor, DocType::Advanced);
        assert!(!text.contains("Python | Python"));
        // The feature bullet still mentions the framework integration.
        assert!(text.contains("**Python Integration**"));
    }

    #[test]
    fn generic_commands_for_other_languages() {
        let mut descriptor = python_descriptor();
        descriptor.language = Language::Rust;
        let text = render(&descriptor, DocType::Simple);
        assert!(text.contains("# Install dependencies based on your project type"));
        assert!(text.contains("# Run the application based on your project type"));
    }

    #[test]
    fn badge_escapes_language_spaces() {
        let mut descriptor = python_descriptor();
        descriptor.language = Language::CCpp;
        let text = render(&descriptor, DocType::Advanced);
        assert!(text.contains("language-C/C++-blue.svg"));

        descriptor.language = Language::JavaScriptOrTypeScript;
        let text = render(&descriptor, DocType::Advanced);
        assert!(text.contains("language-JavaScript/TypeScript-blue.svg"));
    }
}
