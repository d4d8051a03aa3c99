//! Generation orchestration.
//!
//! Every entry point runs the same pipeline:
//!
//! 1. build the prompt from the caller's records (converters + template)
//! 2. call the injected [`TextGenerator`]
//! 3. extract the `<output>` block, then the entity block inside it
//! 4. parse the entity structure and merge it over the input record
//!
//! Nothing is retried. Only the topic outline degrades on malformed output,
//! substituting the placeholder grid.

mod course;
mod department;
mod lecture;
mod professor;
mod topics;

pub use course::course_prompt;
pub use department::department_prompt;
pub use lecture::lecture_prompt;
pub use professor::professor_prompt;
pub use topics::topics_prompt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::convert::{to_tagged_block, TaggedRecord};
use crate::error::{ConverterError, GenerationError, Result, StructureParseError};
use crate::extract::{extract_tag, require_tag};
use crate::prompts::SYSTEM_PROMPT;
use crate::template::PromptTemplate;
use crate::traits::generator::TextGenerator;

/// Tag every response is wrapped in.
pub const OUTPUT_TAG: &str = "output";

/// Per-generator call settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Model identifier passed through to the generator (`None` = its default)
    #[serde(default)]
    pub model: Option<String>,
    /// Overrides the built-in system prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl GenerationSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// System prompt actually sent.
    pub fn effective_system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(SYSTEM_PROMPT)
    }
}

/// Entry point for generating curriculum content.
///
/// # Example
///
/// ```rust,ignore
/// let generator = CurriculumGenerator::new(MockGenerator::new().with_fallback(response));
/// let department = generator
///     .generate_department(&Department::new("Physics"), &[])
///     .await?;
/// ```
pub struct CurriculumGenerator<G: TextGenerator> {
    generator: G,
    settings: GenerationSettings,
}

impl<G: TextGenerator> CurriculumGenerator<G> {
    /// Create with default settings.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            settings: GenerationSettings::default(),
        }
    }

    /// Create with custom settings.
    pub fn with_settings(generator: G, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Call the generator and return the `<output>` block.
    async fn invoke(&self, template: &PromptTemplate, prompt: &str) -> Result<String> {
        let fingerprint = template.fingerprint();
        info!(
            template = template.name(),
            fingerprint = &fingerprint[..12],
            model = self.settings.model.as_deref().unwrap_or("default"),
            "Generating"
        );
        debug!(prompt_len = prompt.len(), "Prompt built");

        let raw = self
            .generator
            .generate_text(
                prompt,
                self.settings.model.as_deref(),
                Some(self.settings.effective_system_prompt()),
            )
            .await
            .map_err(GenerationError::GenerationCall)?;

        if raw.trim().is_empty() {
            return Err(GenerationError::GenerationCall(
                "generator returned an empty response".into(),
            ));
        }
        debug!(response_len = raw.len(), "Response received");

        require_tag(&raw, OUTPUT_TAG)
    }

    /// Call the generator and return the entity block inside `<output>`.
    async fn complete(&self, template: &PromptTemplate, prompt: &str, tag: &str) -> Result<String> {
        let output = self.invoke(template, prompt).await?;
        let block = require_tag(&output, tag)?;
        info!(template = template.name(), "Generation complete");
        Ok(block)
    }
}

/// A context record, or `<no_{tag}/>` when the caller has none.
fn context_block<R: TaggedRecord>(record: Option<&R>) -> std::result::Result<String, ConverterError> {
    match record {
        Some(record) => to_tagged_block(record),
        None => Ok(format!("<no_{}/>", R::TAG)),
    }
}

/// Non-blank text of `<tag>` with whitespace runs left as generated.
fn text_field(block: &str, tag: &str) -> Option<String> {
    extract_tag(block, tag).filter(|value| !value.is_empty())
}

fn required_field(
    block: &str,
    entity: &'static str,
    tag: &str,
) -> std::result::Result<String, StructureParseError> {
    text_field(block, tag)
        .ok_or_else(|| StructureParseError::new(entity, format!("missing <{}>", tag)))
}

/// Leading integer of `<tag>`, so "3 credits" reads as 3.
fn number_field(block: &str, tag: &str) -> Option<u32> {
    let value = text_field(block, tag)?;
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGenerator;
    use crate::types::Department;

    #[test]
    fn test_number_field_reads_leading_digits() {
        let block = "<credits>3 credit hours</credits><age>fifty</age>";
        assert_eq!(number_field(block, "credits"), Some(3));
        assert_eq!(number_field(block, "age"), None);
        assert_eq!(number_field(block, "missing"), None);
    }

    #[test]
    fn test_required_field_rejects_blank() {
        let err = required_field("<name>  </name>", "department", "name").unwrap_err();
        assert_eq!(err.entity, "department");
        assert!(err.reason.contains("<name>"));
    }

    #[test]
    fn test_context_block_marker() {
        assert_eq!(context_block::<Department>(None).unwrap(), "<no_department/>");
        let block = context_block(Some(&Department::new("Physics"))).unwrap();
        assert!(block.contains("<name>Physics</name>"));
    }

    #[test]
    fn test_effective_system_prompt() {
        assert_eq!(GenerationSettings::default().effective_system_prompt(), SYSTEM_PROMPT);
        let custom = GenerationSettings::default().with_system_prompt("Be terse.");
        assert_eq!(custom.effective_system_prompt(), "Be terse.");
    }

    #[tokio::test]
    async fn test_settings_are_passed_to_generator() {
        let mock = MockGenerator::new()
            .with_fallback("<output><department><name>Physics</name><description>D</description></department></output>");
        let generator = CurriculumGenerator::with_settings(
            mock,
            GenerationSettings::default()
                .with_model("ollama:llama3")
                .with_system_prompt("Be terse."),
        );

        generator
            .generate_department(&Department::new("Physics"), &[])
            .await
            .unwrap();

        let calls = generator.generator().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model.as_deref(), Some("ollama:llama3"));
        assert_eq!(calls[0].system_prompt.as_deref(), Some("Be terse."));
    }

    #[tokio::test]
    async fn test_blank_response_is_a_generation_call_error() {
        let generator = CurriculumGenerator::new(MockGenerator::new().with_fallback("  \n"));
        let err = generator
            .generate_department(&Department::new("Physics"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::GenerationCall(_)));
    }

    #[tokio::test]
    async fn test_entity_tag_is_searched_inside_output_only() {
        let raw = "<department><name>Decoy</name><description>x</description></department>\n<output>nothing useful</output>";
        let generator = CurriculumGenerator::new(MockGenerator::new().with_fallback(raw));
        let err = generator
            .generate_department(&Department::new("Physics"), &[])
            .await
            .unwrap_err();
        match err {
            GenerationError::Extraction { tag, excerpt } => {
                assert_eq!(tag, "department");
                assert_eq!(excerpt, "nothing useful");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
