use crate::convert::{to_tagged_block, to_tagged_list, TaggedRecord};
use crate::error::{PromptBuildError, Result, StructureParseError};
use crate::prompts::LECTURE;
use crate::template::TemplateVars;
use crate::traits::generator::TextGenerator;
use crate::types::{merge_text, Course, Lecture, Professor, Topic};

use super::{context_block, required_field, text_field, CurriculumGenerator};

/// Render the lecture prompt without calling a generator.
///
/// `outline_context` is the course's topic list. When it is empty and the
/// course carries a generated outline, that outline is shown instead.
pub fn lecture_prompt(
    lecture: &Lecture,
    course: &Course,
    professor: Option<&Professor>,
    outline_context: &[Topic],
) -> std::result::Result<String, PromptBuildError> {
    let course_outline = match (&course.outline, outline_context.is_empty()) {
        (Some(outline), true) => outline.to_xml(),
        _ => to_tagged_list(outline_context)?,
    };

    let vars = TemplateVars::new()
        .with("lecture", to_tagged_block(lecture)?)
        .with("course", to_tagged_block(course)?)
        .with("professor", context_block(professor)?)
        .with("course_outline", course_outline);
    Ok(LECTURE.render(&vars)?)
}

fn parse_lecture(
    block: &str,
    current: &Lecture,
) -> std::result::Result<Lecture, StructureParseError> {
    let content = required_field(block, Lecture::TAG, "content")?;

    Ok(Lecture {
        title: merge_text(&current.title, text_field(block, "title")),
        description: merge_text(&current.description, text_field(block, "description")),
        content: Some(content),
        ..current.clone()
    })
}

impl<G: TextGenerator> CurriculumGenerator<G> {
    /// Write the full text of one lecture.
    pub async fn generate_lecture(
        &self,
        lecture: &Lecture,
        course: &Course,
        professor: Option<&Professor>,
        outline_context: &[Topic],
    ) -> Result<Lecture> {
        let prompt = lecture_prompt(lecture, course, professor, outline_context)?;
        let block = self.complete(&LECTURE, &prompt, Lecture::TAG).await?;
        Ok(parse_lecture(&block, lecture)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::Outline;
    use uuid::Uuid;

    fn course() -> Course {
        Course::new("CS101", "Intro to CS").with_schedule(2, 1)
    }

    #[test]
    fn test_prompt_includes_topic_list() {
        let topics = vec![Topic::new("Intro", 1, 1), Topic::new("Loops", 2, 1)];
        let prompt =
            lecture_prompt(&Lecture::new("Intro", 1, 1), &course(), None, &topics).unwrap();

        assert!(prompt.contains("<title>Loops</title>"));
        assert!(prompt.contains("<content>[GENERATE]</content>"));
        assert!(prompt.contains("<no_professor/>"));
    }

    #[test]
    fn test_prompt_falls_back_to_course_outline() {
        let mut course = course();
        course.outline = Some(Outline::placeholder(2, 1));
        let prompt = lecture_prompt(&Lecture::new("Intro", 1, 1), &course, None, &[]).unwrap();

        assert!(prompt.contains("<week number=\"2\">"));
        assert!(!prompt.contains("<no_existing_topics/>"));
    }

    #[test]
    fn test_prompt_without_any_outline() {
        let prompt = lecture_prompt(&Lecture::new("Intro", 1, 1), &course(), None, &[]).unwrap();
        assert!(prompt.contains("<no_existing_topics/>"));
    }

    #[test]
    fn test_prompt_rejects_zero_week() {
        let err =
            lecture_prompt(&Lecture::new("Intro", 0, 1), &course(), None, &[]).unwrap_err();
        assert!(matches!(err, PromptBuildError::Converter(_)));
    }

    #[test]
    fn test_parse_keeps_ids_and_position() {
        let id = Uuid::new_v4();
        let current = Lecture {
            id: Some(id),
            audio_url: Some("s3://lectures/1.mp3".to_string()),
            ..Lecture::new("Intro", 1, 2)
        };
        let block = "<title>Welcome to Computing</title><description>Overview.</description><content>Good morning, everyone.</content>";

        let parsed = parse_lecture(block, &current).unwrap();
        assert_eq!(parsed.id, Some(id));
        assert_eq!(parsed.week_number, Some(1));
        assert_eq!(parsed.order_in_week, Some(2));
        assert_eq!(parsed.audio_url.as_deref(), Some("s3://lectures/1.mp3"));
        assert_eq!(parsed.title.as_deref(), Some("Welcome to Computing"));
        assert_eq!(parsed.content.as_deref(), Some("Good morning, everyone."));
    }

    #[test]
    fn test_parse_requires_content() {
        let err = parse_lecture("<title>Intro</title>", &Lecture::default()).unwrap_err();
        assert_eq!(err.entity, "lecture");
    }
}
