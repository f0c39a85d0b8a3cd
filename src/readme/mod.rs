//! Document generator: provider-backed README drafting with a
//! deterministic template fallback.

pub mod prompt;
pub mod template;

use crate::analyze::ProjectDescriptor;
use crate::context::ServiceContext;
use crate::ports::text_gen::GenerationRequest;

/// Maximum tokens requested from the provider.
const MAX_TOKENS: u32 = 2000;

/// Sampling temperature for provider-backed generation.
const TEMPERATURE: f32 = 0.7;

/// The kind of README to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    /// Title, description, install, usage, license.
    Simple,
    /// Full document with badges, features, tech stack, and stubs.
    Advanced,
    /// Installation-focused document with stepwise setup.
    Installation,
}

impl DocType {
    /// Parses a type name leniently; anything unrecognized is
    /// [`DocType::Advanced`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "simple" => Self::Simple,
            "installation" => Self::Installation,
            _ => Self::Advanced,
        }
    }
}

/// Generates a README for the descriptor.
///
/// When a text-generation provider is configured, the descriptor is
/// embedded into a prompt and the provider's output is returned. Any
/// provider failure is announced on the diagnostics sink and silently
/// degrades to template generation; this function never fails and never
/// returns an empty document.
#[must_use]
pub fn generate(
    ctx: &ServiceContext,
    descriptor: &ProjectDescriptor,
    doc_type: DocType,
) -> String {
    if let Some(provider) = ctx.text_gen.as_deref() {
        let request = GenerationRequest {
            system_prompt: prompt::SYSTEM_PROMPT.to_string(),
            user_prompt: prompt::build_user_prompt(descriptor, doc_type),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        match provider.generate(&request) {
            Ok(text) => return text,
            Err(e) => {
                ctx.diag.error(&format!("Error generating README: {e}"));
                ctx.diag.warn("Falling back to template-based generation.");
            }
        }
    }
    template::render(descriptor, doc_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{Language, ProjectStructure};
    use crate::test_support::{
        FailingGenerator, MemFs, RecordingDiagnostics, ScriptedPrompter, StubGenerator,
        StubTemplateSource,
    };

    fn descriptor() -> ProjectDescriptor {
        ProjectDescriptor {
            name: "demo".into(),
            description: "A demo project".into(),
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

    fn context(diag: &RecordingDiagnostics) -> ServiceContext {
        ServiceContext {
            fs: Box::new(MemFs::new()),
            text_gen: None,
            host: None,
            templates: Box::new(StubTemplateSource("")),
            prompter: Box::new(ScriptedPrompter::new(&[])),
            diag: Box::new(diag.clone()),
        }
    }

    #[test]
    fn no_provider_renders_template_silently() {
        let diag = RecordingDiagnostics::new();
        let ctx = context(&diag);
        let text = generate(&ctx, &descriptor(), DocType::Simple);
        assert_eq!(text, template::render(&descriptor(), DocType::Simple));
        assert!(diag.messages().is_empty());
    }

    #[test]
    fn provider_output_is_returned_verbatim() {
        let diag = RecordingDiagnostics::new();
        let mut ctx = context(&diag);
        ctx.text_gen = Some(Box::new(StubGenerator("# Drafted by the provider\n")));
        let text = generate(&ctx, &descriptor(), DocType::Advanced);
        assert_eq!(text, "# Drafted by the provider\n");
    }

    #[test]
    fn provider_failure_falls_back_and_announces() {
        let diag = RecordingDiagnostics::new();
        let mut ctx = context(&diag);
        ctx.text_gen = Some(Box::new(FailingGenerator));

        let text = generate(&ctx, &descriptor(), DocType::Simple);

        assert_eq!(text, template::render(&descriptor(), DocType::Simple));
        let warnings = diag.warnings();
        assert!(warnings.iter().any(|w| w.contains("Falling back to template-based generation")));
    }

    #[test]
    fn doc_type_parsing_defaults_to_advanced() {
        assert_eq!(DocType::parse("simple"), DocType::Simple);
        assert_eq!(DocType::parse("Installation"), DocType::Installation);
        assert_eq!(DocType::parse("advanced"), DocType::Advanced);
        assert_eq!(DocType::parse("fancy"), DocType::Advanced);
        assert_eq!(DocType::parse(""), DocType::Advanced);
    }
}
