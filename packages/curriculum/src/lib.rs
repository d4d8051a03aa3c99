//! Curriculum generation for an AI-run university
//!
//! Turns academic records (departments, professors, courses, topics,
//! lectures) into prompts, sends them to a text generator, and parses the
//! tagged responses back into records.
//!
//! # Usage
//!
//! ```rust,ignore
//! use curriculum::{Course, CurriculumGenerator};
//! use curriculum::testing::MockGenerator;
//!
//! let generator = CurriculumGenerator::new(MockGenerator::new().with_fallback(response));
//!
//! let course = Course::new("CS101", "Intro to CS").with_schedule(14, 2);
//! let outline = generator.generate_topics(&course, None).await?;
//! assert_eq!(outline.weeks.len(), 14);
//! ```
//!
//! # Modules
//!
//! - [`template`] - Prompt templates with required variables
//! - [`convert`] - Records → tagged text blocks
//! - [`extract`] - Tagged blocks → text
//! - [`outline`] - Course outline parsing and grid normalization
//! - [`prompts`] - The prompt catalog
//! - [`generate`] - Per-entity generation pipelines
//! - [`traits`] - The text generator seam
//! - [`config`] - Environment configuration
//! - [`testing`] - Mock generator for tests

pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod generate;
pub mod outline;
pub mod prompts;
pub mod template;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "llm")]
pub mod ai;

// Re-export core types at crate root
pub use error::{
    BoxError, ConverterError, GenerationError, PromptBuildError, Result, StructureParseError,
    TemplateError,
};
pub use generate::{CurriculumGenerator, GenerationSettings};
pub use outline::{LectureSlot, Outline, WeekOutline};
pub use template::{PromptTemplate, TemplateVars};
pub use traits::generator::TextGenerator;
pub use types::{Course, Department, Lecture, Professor, Topic};
