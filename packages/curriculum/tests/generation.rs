//! Integration tests for the generation pipelines.
//!
//! These drive every entry point through `MockGenerator`:
//! 1. Build the prompt from records
//! 2. Replay a canned response
//! 3. Extract and parse the tagged output
//! 4. Check the merged record (or the error kind)

use std::sync::Arc;

use curriculum::{
    outline::placeholder_title, prompts, testing::MockGenerator, Course, CurriculumGenerator,
    Department, GenerationError, GenerationSettings, Lecture, Outline, Professor,
    PromptBuildError, Topic,
};
use uuid::Uuid;

/// Helper to create a generator that answers every call with `response`.
fn generator_with(response: &str) -> CurriculumGenerator<MockGenerator> {
    CurriculumGenerator::new(MockGenerator::new().with_fallback(response))
}

fn cs101() -> Course {
    Course::new("CS101", "Intro to CS").with_schedule(2, 1)
}

#[tokio::test]
async fn test_cs101_outline_is_completed_to_the_grid() {
    let generator = generator_with(
        r#"<output><course><title>Intro to CS</title><topics><week number="1"><topic><title>Intro</title></topic></week></topics></course></output>"#,
    );

    let outline = generator.generate_topics(&cs101(), None).await.unwrap();

    assert_eq!(outline.weeks.len(), 2);
    assert_eq!(outline.titles(), vec![vec!["Intro"], vec!["Week 2, Lecture 1"]]);
}

#[tokio::test]
async fn test_topic_prompt_carries_course_and_professor() {
    let generator = generator_with("<output><course><topics><week number=\"1\"></week></topics></course></output>");
    let professor = Professor::new("Dr. Ada Lovelace").with_specialization("Computation");

    generator
        .generate_topics(&cs101(), Some(&professor))
        .await
        .unwrap();

    let prompt = generator.generator().last_prompt().unwrap();
    assert!(prompt.contains("<code>CS101</code>"));
    assert!(prompt.contains("<name>Dr. Ada Lovelace</name>"));
    assert!(prompt.contains("runs for 2 weeks with 1 lectures per week"));
}

#[tokio::test]
async fn test_outline_weeks_outside_range_are_discarded() {
    let generator = generator_with(
        r#"<output><course><topics>
            <week number="3"><topic><title>Beyond</title></topic></week>
            <week number="2"><topic><title>Recursion</title></topic><topic><title>Extra</title></topic></week>
        </topics></course></output>"#,
    );

    let outline = generator.generate_topics(&cs101(), None).await.unwrap();

    assert_eq!(outline.titles(), vec![vec!["Week 1, Lecture 1"], vec!["Recursion"]]);
}

#[tokio::test]
async fn test_malformed_outline_degrades_to_placeholder_grid() {
    let generator = generator_with(
        r#"<output><course><topics><week number="first"><topic>Intro</topic></week></topics></course></output>"#,
    );
    let course = Course::new("CS101", "Intro to CS").with_schedule(3, 2);

    let outline = generator.generate_topics(&course, None).await.unwrap();

    assert_eq!(outline, Outline::placeholder(3, 2));
    assert_eq!(outline.total_lectures(), 6);
    assert_eq!(outline.weeks[2].lectures[1].title, placeholder_title(3, 2));
}

#[tokio::test]
async fn test_generator_failure_is_a_generation_call_error() {
    let generator = CurriculumGenerator::new(MockGenerator::new().failing("upstream 503"));

    let err = generator
        .generate_department(&Department::new("Physics"), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::GenerationCall(_)));
    assert!(!err.is_client_error());
    assert!(err.to_string().contains("upstream 503"));
}

#[tokio::test]
async fn test_missing_output_block_is_an_extraction_error() {
    let generator = generator_with("Sorry, I can only help with that later.");

    let err = generator
        .generate_professor(&Professor::new("Dr. Reid"), None, &[])
        .await
        .unwrap_err();

    match err {
        GenerationError::Extraction { tag, excerpt } => {
            assert_eq!(tag, "output");
            assert!(excerpt.starts_with("Sorry"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_bad_input_fails_before_calling_the_generator() {
    let generator = generator_with("<output></output>");
    let untitled = Course {
        code: Some("CS102".to_string()),
        ..Default::default()
    };

    let err = generator
        .generate_course(&cs101(), None, &[untitled])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerationError::PromptBuild(PromptBuildError::Converter(_))
    ));
    assert!(err.is_client_error());
    assert!(generator.generator().calls().is_empty());
}

#[tokio::test]
async fn test_missing_required_attribute_is_a_structure_error() {
    let generator = generator_with("<output><lecture><title>Intro</title></lecture></output>");

    let err = generator
        .generate_lecture(&Lecture::new("Intro", 1, 1), &cs101(), None, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::StructureParse(_)));
}

#[tokio::test]
async fn test_department_round_trip() {
    let id = Uuid::new_v4();
    let department = Department {
        id: Some(id),
        ..Department::new("Physics")
    };
    let generator = generator_with(
        "Here you go:\n<output>\n<department>\n<name>Physics</name>\n<code>PHYS</code>\n<faculty>Natural Sciences</faculty>\n<description>The study of matter.</description>\n</department>\n</output>",
    );

    let result = generator
        .generate_department(&department, &[Department::new("Mathematics")])
        .await
        .unwrap();

    assert_eq!(result.id, Some(id));
    assert_eq!(result.code.as_deref(), Some("PHYS"));
    assert_eq!(result.description.as_deref(), Some("The study of matter."));

    let call = &generator.generator().calls()[0];
    assert!(call.prompt.contains("<name>Mathematics</name>"));
    assert_eq!(call.system_prompt.as_deref(), Some(prompts::SYSTEM_PROMPT));
    assert_eq!(call.model, None);
}

#[tokio::test]
async fn test_course_with_embedded_topics_gets_an_outline() {
    let generator = generator_with(
        r#"<output><course>
            <title>Intro to CS</title>
            <description>Foundations of computing.</description>
            <credits>4</credits>
            <topics><week number="2"><topic><title>Algorithms</title></topic></week></topics>
        </course></output>"#,
    );

    let course = generator
        .generate_course(&cs101(), Some(&Department::new("Computer Science")), &[])
        .await
        .unwrap();

    assert_eq!(course.credits, Some(4));
    assert_eq!(course.total_weeks, 2);
    let outline = course.outline.unwrap();
    assert_eq!(outline.titles(), vec![vec!["Week 1, Lecture 1"], vec!["Algorithms"]]);
}

#[tokio::test]
async fn test_course_fields_survive_leading_topics() {
    let generator = generator_with(
        r#"<output><course>
            <topics><week number="1"><topic><title>Bits and Bytes</title><description>Binary</description></topic></week></topics>
            <title>Intro to CS</title>
            <description>Foundations.</description>
        </course></output>"#,
    );

    let course = generator.generate_course(&cs101(), None, &[]).await.unwrap();

    assert_eq!(course.title.as_deref(), Some("Intro to CS"));
    assert_eq!(course.description.as_deref(), Some("Foundations."));
    assert_eq!(
        course.outline.unwrap().titles(),
        vec![vec!["Bits and Bytes"], vec!["Week 2, Lecture 1"]]
    );
}

#[tokio::test]
async fn test_negative_week_does_not_discard_outline() {
    let generator = generator_with(
        r#"<output><course><topics>
            <week number="-1"><topic><title>Prelude</title></topic></week>
            <week number="1"><topic><title>Intro</title></topic></week>
        </topics></course></output>"#,
    );

    let outline = generator.generate_topics(&cs101(), None).await.unwrap();

    assert_eq!(outline.titles(), vec![vec!["Intro"], vec!["Week 2, Lecture 1"]]);
}

#[tokio::test]
async fn test_lecture_written_in_professor_voice() {
    let generator = CurriculumGenerator::with_settings(
        MockGenerator::new().with_fallback(
            "<output><lecture><title>Intro</title><description>Why computers.</description><content>Welcome, everyone.</content></lecture></output>",
        ),
        GenerationSettings::default().with_model("fast"),
    );
    let professor = Professor {
        teaching_style: Some("Story-driven".to_string()),
        ..Professor::new("Dr. Ada Lovelace")
    };
    let outline = vec![Topic::new("Intro", 1, 1), Topic::new("Algorithms", 2, 1)];

    let lecture = generator
        .generate_lecture(&Lecture::new("Intro", 1, 1), &cs101(), Some(&professor), &outline)
        .await
        .unwrap();

    assert_eq!(lecture.content.as_deref(), Some("Welcome, everyone."));
    assert_eq!(lecture.week_number, Some(1));

    let call = &generator.generator().calls()[0];
    assert_eq!(call.model.as_deref(), Some("fast"));
    assert!(call.prompt.contains("<teaching_style>Story-driven</teaching_style>"));
    assert!(call.prompt.contains("<title>Algorithms</title>"));
}

#[tokio::test]
async fn test_generator_is_shareable_across_tasks() {
    let generator = Arc::new(generator_with(
        "<output><department><name>History</name><description>The past.</description></department></output>",
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move {
                generator
                    .generate_department(&Department::new(format!("Dept {i}")), &[])
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(generator.generator().calls().len(), 4);
}
