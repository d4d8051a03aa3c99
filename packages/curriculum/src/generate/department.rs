use crate::convert::{to_tagged_block, to_tagged_list, TaggedRecord};
use crate::error::{PromptBuildError, Result, StructureParseError};
use crate::prompts::DEPARTMENT;
use crate::template::TemplateVars;
use crate::traits::generator::TextGenerator;
use crate::types::{merge_text, Department};

use super::{required_field, text_field, CurriculumGenerator};

/// Render the department prompt without calling a generator.
pub fn department_prompt(
    department: &Department,
    existing: &[Department],
) -> std::result::Result<String, PromptBuildError> {
    let vars = TemplateVars::new()
        .with("department", to_tagged_block(department)?)
        .with("existing_departments", to_tagged_list(existing)?);
    Ok(DEPARTMENT.render(&vars)?)
}

fn parse_department(
    block: &str,
    current: &Department,
) -> std::result::Result<Department, StructureParseError> {
    let name = required_field(block, Department::TAG, "name")?;
    let description = required_field(block, Department::TAG, "description")?;

    Ok(Department {
        id: current.id,
        name: Some(name),
        code: merge_text(&current.code, text_field(block, "code")),
        faculty: merge_text(&current.faculty, text_field(block, "faculty")),
        description: Some(description),
    })
}

impl<G: TextGenerator> CurriculumGenerator<G> {
    /// Fill in a department's missing attributes.
    ///
    /// `existing` departments are shown to the model so it avoids duplicates.
    pub async fn generate_department(
        &self,
        department: &Department,
        existing: &[Department],
    ) -> Result<Department> {
        let prompt = department_prompt(department, existing)?;
        let block = self.complete(&DEPARTMENT, &prompt, Department::TAG).await?;
        Ok(parse_department(&block, department)?)
    }
}
