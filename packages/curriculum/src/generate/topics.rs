use tracing::{info, warn};

use crate::convert::to_tagged_block;
use crate::error::{PromptBuildError, Result};
use crate::outline::{outline_or_placeholder, Outline};
use crate::prompts::TOPICS;
use crate::template::TemplateVars;
use crate::traits::generator::TextGenerator;
use crate::types::{Course, Professor};

use super::{context_block, CurriculumGenerator};

/// Render the topic outline prompt without calling a generator.
pub fn topics_prompt(
    course: &Course,
    professor: Option<&Professor>,
) -> std::result::Result<String, PromptBuildError> {
    let vars = TemplateVars::new()
        .with("course", to_tagged_block(course)?)
        .with("professor", context_block(professor)?)
        .with("total_weeks", course.total_weeks.to_string())
        .with("lectures_per_week", course.lectures_per_week.to_string());
    Ok(TOPICS.render(&vars)?)
}

impl<G: TextGenerator> CurriculumGenerator<G> {
    /// Plan a course's lecture topics.
    ///
    /// The result always covers weeks `1..=total_weeks` with exactly
    /// `lectures_per_week` slots each. An outline that cannot be parsed is
    /// replaced by the placeholder grid instead of failing.
    pub async fn generate_topics(
        &self,
        course: &Course,
        professor: Option<&Professor>,
    ) -> Result<Outline> {
        let prompt = topics_prompt(course, professor)?;
        let output = self.invoke(&TOPICS, &prompt).await?;

        let (outline, err) =
            outline_or_placeholder(&output, course.total_weeks, course.lectures_per_week);
        match err {
            Some(err) => warn!(
                error = %err,
                total_weeks = course.total_weeks,
                lectures_per_week = course.lectures_per_week,
                "Topic outline unparseable, using placeholder grid"
            ),
            None => info!(
                weeks = outline.weeks.len(),
                lectures = outline.total_lectures(),
                "Topic outline generated"
            ),
        }
        Ok(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::testing::MockGenerator;

    #[test]
    fn test_prompt_states_grid_size() {
        let course = Course::new("CS101", "Intro").with_schedule(10, 3);
        let prompt = topics_prompt(&course, None).unwrap();

        assert!(prompt.contains("runs for 10 weeks with 3 lectures per week"));
        assert!(prompt.contains("<no_professor/>"));
    }

    #[test]
    fn test_prompt_rejects_empty_grid() {
        let course = Course::new("CS101", "Intro").with_schedule(4, 0);
        assert!(matches!(
            topics_prompt(&course, None),
            Err(PromptBuildError::Converter(_))
        ));
    }

    #[tokio::test]
    async fn test_legacy_schema_inside_output() {
        let raw = r#"<output><course><topics>
            <week number="1">
                <lecture number="2"><title>Second</title></lecture>
                <lecture number="1"><title>First</title></lecture>
            </week>
        </topics></course></output>"#;
        let generator = CurriculumGenerator::new(MockGenerator::new().with_response(raw));
        let course = Course::new("CS101", "Intro").with_schedule(1, 2);

        let outline = generator.generate_topics(&course, None).await.unwrap();
        assert_eq!(outline.titles(), vec![vec!["First", "Second"]]);
    }

    #[tokio::test]
    async fn test_unparseable_outline_becomes_placeholder_grid() {
        let generator = CurriculumGenerator::new(
            MockGenerator::new().with_response("<output><course><topics>none</topics></course></output>"),
        );
        let course = Course::new("CS101", "Intro").with_schedule(2, 1);

        let outline = generator.generate_topics(&course, None).await.unwrap();
        assert_eq!(outline, Outline::placeholder(2, 1));
    }

    #[tokio::test]
    async fn test_missing_output_is_still_an_error() {
        let generator =
            CurriculumGenerator::new(MockGenerator::new().with_response("I'd rather not."));
        let course = Course::new("CS101", "Intro");

        let err = generator.generate_topics(&course, None).await.unwrap_err();
        assert!(matches!(err, GenerationError::Extraction { .. }));
    }
}
