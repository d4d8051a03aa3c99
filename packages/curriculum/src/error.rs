//! Typed errors for the curriculum library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! bad input (`PromptBuild`) apart from upstream failures.

use thiserror::Error;

/// Boxed error returned by text generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while rendering a [`PromptTemplate`](crate::template::PromptTemplate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// One or more required variables were not supplied
    #[error("template '{template}' is missing required variables: {}", .missing.join(", "))]
    MissingVariables {
        template: String,
        missing: Vec<String>,
    },

    /// The template references a placeholder that is neither required nor supplied
    #[error("template '{template}' references unknown placeholder '{{{name}}}'")]
    UnknownPlaceholder { template: String, name: String },

    /// A stray brace that is neither an escape nor a placeholder
    #[error("template '{template}' has a malformed placeholder at byte {position}")]
    Malformed { template: String, position: usize },
}

/// Errors raised while converting records into tagged blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConverterError {
    /// A structurally required field is absent
    #[error("{entity} #{index} has no {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
        index: usize,
    },

    /// A field is present but out of range
    #[error("{entity} has invalid {field}: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// The prompt could not be built from the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptBuildError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Converter(#[from] ConverterError),
}

/// An entity-specific structure could not be parsed from an extracted block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse {entity}: {reason}")]
pub struct StructureParseError {
    pub entity: &'static str,
    pub reason: String,
}

impl StructureParseError {
    pub fn new(entity: &'static str, reason: impl Into<String>) -> Self {
        Self {
            entity,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during a generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Caller input could not be turned into a prompt
    #[error("failed to build prompt: {0}")]
    PromptBuild(#[from] PromptBuildError),

    /// The text generator failed or returned nothing
    #[error("text generation failed: {0}")]
    GenerationCall(#[source] BoxError),

    /// Expected block missing from the generator output
    #[error("no <{tag}> block in generator output (starts with: {excerpt:?})")]
    Extraction { tag: String, excerpt: String },

    /// The extracted block did not have the expected structure
    #[error(transparent)]
    StructureParse(#[from] StructureParseError),
}

impl GenerationError {
    /// True when the failure is the caller's fault (4xx at an HTTP boundary).
    pub fn is_client_error(&self) -> bool {
        matches!(self, GenerationError::PromptBuild(_))
    }
}

impl From<TemplateError> for GenerationError {
    fn from(err: TemplateError) -> Self {
        GenerationError::PromptBuild(err.into())
    }
}

impl From<ConverterError> for GenerationError {
    fn from(err: ConverterError) -> Self {
        GenerationError::PromptBuild(err.into())
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerationError>;
