use crate::convert::{to_tagged_block, to_tagged_list, TaggedRecord};
use crate::error::{PromptBuildError, Result, StructureParseError};
use crate::prompts::PROFESSOR;
use crate::template::TemplateVars;
use crate::traits::generator::TextGenerator;
use crate::types::{merge_text, Department, Professor};

use super::{context_block, number_field, required_field, text_field, CurriculumGenerator};

/// Render the professor prompt without calling a generator.
pub fn professor_prompt(
    professor: &Professor,
    department: Option<&Department>,
    existing: &[Professor],
) -> std::result::Result<String, PromptBuildError> {
    let vars = TemplateVars::new()
        .with("professor", to_tagged_block(professor)?)
        .with("department", context_block(department)?)
        .with("existing_professors", to_tagged_list(existing)?);
    Ok(PROFESSOR.render(&vars)?)
}

fn parse_professor(
    block: &str,
    current: &Professor,
    department: Option<&Department>,
) -> std::result::Result<Professor, StructureParseError> {
    let name = required_field(block, Professor::TAG, "name")?;
    let description = required_field(block, Professor::TAG, "description")?;

    Ok(Professor {
        id: current.id,
        name: Some(name),
        title: merge_text(&current.title, text_field(block, "title")),
        specialization: merge_text(&current.specialization, text_field(block, "specialization")),
        gender: merge_text(&current.gender, text_field(block, "gender")),
        age: number_field(block, "age").or(current.age),
        accent: merge_text(&current.accent, text_field(block, "accent")),
        description: Some(description),
        background: merge_text(&current.background, text_field(block, "background")),
        personality: merge_text(&current.personality, text_field(block, "personality")),
        teaching_style: merge_text(&current.teaching_style, text_field(block, "teaching_style")),
        department_id: current.department_id.or(department.and_then(|d| d.id)),
        department_name: current
            .department_name
            .clone()
            .or_else(|| department.and_then(|d| d.name.clone())),
    })
}

impl<G: TextGenerator> CurriculumGenerator<G> {
    /// Build a professor persona.
    ///
    /// The department (if any) is attached to the result when the input
    /// professor does not name one.
    pub async fn generate_professor(
        &self,
        professor: &Professor,
        department: Option<&Department>,
        existing: &[Professor],
    ) -> Result<Professor> {
        let prompt = professor_prompt(professor, department, existing)?;
        let block = self.complete(&PROFESSOR, &prompt, Professor::TAG).await?;
        Ok(parse_professor(&block, professor, department)?)
    }
}
