use tracing::warn;

use crate::convert::{to_tagged_block, to_tagged_list, TaggedRecord};
use crate::error::{PromptBuildError, Result, StructureParseError};
use crate::extract::{extract_tag, strip_tag};
use crate::outline::outline_or_placeholder;
use crate::prompts::COURSE;
use crate::template::TemplateVars;
use crate::traits::generator::TextGenerator;
use crate::types::{merge_text, Course, Department};

use super::{context_block, number_field, required_field, text_field, CurriculumGenerator};

/// Render the course prompt without calling a generator.
pub fn course_prompt(
    course: &Course,
    department: Option<&Department>,
    existing: &[Course],
) -> std::result::Result<String, PromptBuildError> {
    let vars = TemplateVars::new()
        .with("course", to_tagged_block(course)?)
        .with("department", context_block(department)?)
        .with("existing_courses", to_tagged_list(existing)?);
    Ok(COURSE.render(&vars)?)
}

fn parse_course(
    block: &str,
    current: &Course,
    department: Option<&Department>,
) -> std::result::Result<Course, StructureParseError> {
    // Course-level fields only; the nested outline has its own <title>s
    let fields = strip_tag(&strip_tag(block, "topics"), "outline");
    let title = required_field(&fields, Course::TAG, "title")?;
    let description = required_field(&fields, Course::TAG, "description")?;

    let outline = match extract_tag(block, "topics") {
        Some(topics) => {
            let (outline, err) =
                outline_or_placeholder(&topics, current.total_weeks, current.lectures_per_week);
            if let Some(err) = err {
                warn!(error = %err, "Course outline unparseable, using placeholder grid");
            }
            Some(outline)
        }
        None => current.outline.clone(),
    };

    Ok(Course {
        id: current.id,
        code: merge_text(&current.code, text_field(&fields, "code")),
        title: Some(title),
        description: Some(description),
        level: merge_text(&current.level, text_field(&fields, "level")),
        credits: number_field(&fields, "credits").or(current.credits),
        lectures_per_week: current.lectures_per_week,
        total_weeks: current.total_weeks,
        outline,
        department_id: current.department_id.or(department.and_then(|d| d.id)),
        professor_id: current.professor_id,
    })
}

impl<G: TextGenerator> CurriculumGenerator<G> {
    /// Fill in a course catalog entry.
    ///
    /// The schedule (`total_weeks`, `lectures_per_week`) always comes from
    /// the input. When the response also carries a `<topics>` outline it is
    /// normalized to that schedule and attached.
    pub async fn generate_course(
        &self,
        course: &Course,
        department: Option<&Department>,
        existing: &[Course],
    ) -> Result<Course> {
        let prompt = course_prompt(course, department, existing)?;
        let block = self.complete(&COURSE, &prompt, Course::TAG).await?;
        Ok(parse_course(&block, course, department)?)
    }
}
