//! Prompt catalog for each generated entity.
//!
//! Every template asks for a single `<output>` block whose shape is shown
//! literally in the prompt. Record blocks come from
//! [`convert`](crate::convert), so `[GENERATE]` marks what the model fills in.

use crate::template::PromptTemplate;

/// Default system prompt sent with every generation call.
pub const SYSTEM_PROMPT: &str = "You are the academic content designer of a fully AI-run university. \
You write realistic, specific, internally consistent material for departments, faculty and courses. \
Always answer with the exact tagged structure requested and keep any value you were given unchanged.";

/// Department completion.
pub static DEPARTMENT: PromptTemplate = PromptTemplate::from_static(
    "department",
    r#"Complete the description of a university department.

Departments that already exist (do not duplicate their names, codes or focus):
<existing_departments>
{existing_departments}
</existing_departments>

Department to complete. Keep every provided value and replace each [GENERATE] with new content:
{department}

Respond with exactly this structure:
<output>
  <department>
    <name>Department name</name>
    <code>Short uppercase code, e.g. CS</code>
    <faculty>Faculty the department belongs to</faculty>
    <description>Two or three paragraphs on the department's mission, research areas and teaching</description>
  </department>
</output>"#,
    &["department", "existing_departments"],
);

/// Professor persona.
pub static PROFESSOR: PromptTemplate = PromptTemplate::from_static(
    "professor",
    r#"Create a professor persona for an AI-run university. The persona is used to
voice lectures, so personality, accent and teaching style must be concrete.

Department:
{department}

Professors already in this department (make the new one clearly distinct):
<existing_professors>
{existing_professors}
</existing_professors>

Professor to complete. Keep every provided value and replace each [GENERATE] with new content:
{professor}

Respond with exactly this structure:
<output>
  <professor>
    <name>Full name</name>
    <title>Academic title</title>
    <specialization>Research specialization</specialization>
    <gender>Gender</gender>
    <age>Age in years, digits only</age>
    <accent>Spoken accent</accent>
    <description>One paragraph introduction</description>
    <background>Education and career history</background>
    <personality>Personality traits that show in lectures</personality>
    <teaching_style>How they structure and deliver lectures</teaching_style>
  </professor>
</output>"#,
    &["professor", "department", "existing_professors"],
);

/// Course catalog entry.
pub static COURSE: PromptTemplate = PromptTemplate::from_static(
    "course",
    r#"Complete a course catalog entry.

Department:
{department}

Courses the department already offers (avoid overlap):
<existing_courses>
{existing_courses}
</existing_courses>

Course to complete. Keep every provided value and replace each [GENERATE] with new content:
{course}

Respond with exactly this structure:
<output>
  <course>
    <code>Course code</code>
    <title>Course title</title>
    <description>Catalog description, one or two paragraphs</description>
    <level>Undergraduate or Graduate</level>
    <credits>Credit hours, digits only</credits>
  </course>
</output>"#,
    &["course", "department", "existing_courses"],
);

/// Week-by-week topic outline for a course.
pub static TOPICS: PromptTemplate = PromptTemplate::from_static(
    "topics",
    r#"Plan the lecture topics of a course.

Course:
{course}

Instructor:
{professor}

The course runs for {total_weeks} weeks with {lectures_per_week} lectures per week.
Produce exactly {lectures_per_week} topics for every week from 1 to {total_weeks}.
Topics should build on each other in a sensible order.

Respond with exactly this structure:
<output>
  <course>
    <title>Course title</title>
    <topics>
      <week number="1">
        <topic><title>Title of the first lecture of week 1</title></topic>
        <topic><title>Title of the second lecture of week 1</title></topic>
      </week>
      <week number="2">
        <topic><title>Title of the first lecture of week 2</title></topic>
      </week>
    </topics>
  </course>
</output>"#,
    &["course", "professor", "total_weeks", "lectures_per_week"],
);

/// Full lecture text.
pub static LECTURE: PromptTemplate = PromptTemplate::from_static(
    "lecture",
    r#"Write a complete university lecture, spoken by the instructor below.

Course:
{course}

Course outline (for continuity with earlier and later lectures):
<course_outline>
{course_outline}
</course_outline>

Instructor (write in their voice, personality and teaching style):
{professor}

Lecture to write. Keep every provided value and replace each [GENERATE] with new content:
{lecture}

Respond with exactly this structure:
<output>
  <lecture>
    <title>Lecture title</title>
    <description>Two or three sentence summary</description>
    <content>The full lecture as it would be spoken, several thousand words</content>
  </lecture>
</output>"#,
    &["lecture", "course", "professor", "course_outline"],
);

/// Every template in the catalog.
pub fn all() -> [&'static PromptTemplate; 5] {
    [&DEPARTMENT, &PROFESSOR, &COURSE, &TOPICS, &LECTURE]
}

/// Look a template up by name.
pub fn by_name(name: &str) -> Option<&'static PromptTemplate> {
    all().into_iter().find(|t| t.name() == name)
}
