//! Course outline: the weeks × lectures-per-week grid.
//!
//! Generated outlines come back in one of two shapes:
//!
//! ```text
//! <week number="1"><topic><title>Intro</title></topic></week>      (current)
//! <week number="1"><lecture number="1"><title>Intro</title></lecture></week>  (legacy)
//! ```
//!
//! Both parse into [`WeekOutline`]s. [`normalize_outline`] then forces the
//! result onto the declared grid: weeks outside `1..=total_weeks` are
//! dropped, each week is cut or padded to exactly `lectures_per_week`
//! entries, missing weeks are back-filled, and weeks are sorted. Padded
//! slots are titled `"Week {n}, Lecture {m}"`.

use serde::{Deserialize, Serialize};

use crate::error::StructureParseError;
use crate::extract::{extract_all, extract_tag, Element};

const ENTITY: &str = "topic outline";

/// One lecture slot in a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureSlot {
    /// 1-indexed position within the week
    pub number: u32,
    pub title: String,
}

/// All lecture slots of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOutline {
    /// 1-indexed week number
    pub week: u32,
    pub lectures: Vec<LectureSlot>,
}

/// A full course outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub weeks: Vec<WeekOutline>,
}

/// Title used for slots the generator did not fill.
pub fn placeholder_title(week: u32, lecture: u32) -> String {
    format!("Week {}, Lecture {}", week, lecture)
}

impl Outline {
    /// Outline made only of placeholder titles.
    pub fn placeholder(total_weeks: u32, lectures_per_week: u32) -> Self {
        normalize_outline(Vec::new(), total_weeks, lectures_per_week)
    }

    pub fn total_lectures(&self) -> usize {
        self.weeks.iter().map(|w| w.lectures.len()).sum()
    }

    pub fn week(&self, week: u32) -> Option<&WeekOutline> {
        self.weeks.iter().find(|w| w.week == week)
    }

    /// Titles per week, in order.
    pub fn titles(&self) -> Vec<Vec<&str>> {
        self.weeks
            .iter()
            .map(|w| w.lectures.iter().map(|l| l.title.as_str()).collect())
            .collect()
    }

    /// Render in the `<topics>` schema the parser accepts.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<topics>\n");
        for week in &self.weeks {
            out.push_str(&format!("  <week number=\"{}\">\n", week.week));
            for lecture in &week.lectures {
                out.push_str(&format!(
                    "    <topic number=\"{}\"><title>{}</title></topic>\n",
                    lecture.number, lecture.title
                ));
            }
            out.push_str("  </week>\n");
        }
        out.push_str("</topics>");
        out
    }
}

/// Parse every `<week>` element of `xml`.
///
/// Fails when there are no weeks at all or a week number is not an integer.
/// Weeks numbered below zero can never be on the grid and are skipped here;
/// entries without a title are dropped here and padded later.
pub fn parse_outline(xml: &str) -> Result<Vec<WeekOutline>, StructureParseError> {
    let weeks = extract_all(xml, "week");
    if weeks.is_empty() {
        return Err(StructureParseError::new(ENTITY, "no <week> elements"));
    }

    let mut parsed = Vec::with_capacity(weeks.len());
    for element in &weeks {
        let Some(week) = week_number(element)? else {
            continue;
        };
        parsed.push(WeekOutline {
            week,
            lectures: parse_entries(&element.inner),
        });
    }
    Ok(parsed)
}

/// `None` for integers outside the `u32` range (negative or huge).
fn week_number(element: &Element) -> Result<Option<u32>, StructureParseError> {
    let raw = element
        .attr("number")
        .map(str::to_string)
        .or_else(|| extract_tag(&element.inner, "number"))
        .ok_or_else(|| StructureParseError::new(ENTITY, "week without a number"))?;

    let number = raw.trim().parse::<i64>().map_err(|_| {
        StructureParseError::new(ENTITY, format!("week number '{}' is not an integer", raw))
    })?;
    Ok(u32::try_from(number).ok())
}

/// `<topic>` entries, or legacy `<lecture>` entries when a week has no topics.
fn parse_entries(week_body: &str) -> Vec<LectureSlot> {
    let mut entries = extract_all(week_body, "topic");
    if entries.is_empty() {
        entries = extract_all(week_body, "lecture");
    }

    let mut slots: Vec<(Option<u32>, usize, String)> = entries
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let title = entry_title(entry)?;
            let number = entry
                .attr("number")
                .map(str::to_string)
                .or_else(|| extract_tag(&entry.inner, "number"))
                .and_then(|n| n.trim().parse::<u32>().ok());
            Some((number, position, title))
        })
        .collect();

    // Explicitly numbered entries first, by number; the rest keep document order
    slots.sort_by_key(|(number, position, _)| (number.unwrap_or(u32::MAX), *position));

    slots
        .into_iter()
        .enumerate()
        .map(|(i, (_, _, title))| LectureSlot {
            number: i as u32 + 1,
            title,
        })
        .collect()
}

fn entry_title(entry: &Element) -> Option<String> {
    let title = match extract_tag(&entry.inner, "title") {
        Some(title) => title,
        None if !entry.inner.contains('<') => entry.inner.clone(),
        None => return None,
    };
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Force parsed weeks onto the `total_weeks` × `lectures_per_week` grid.
///
/// Duplicate week numbers keep their first occurrence.
pub fn normalize_outline(
    parsed: Vec<WeekOutline>,
    total_weeks: u32,
    lectures_per_week: u32,
) -> Outline {
    let mut weeks: Vec<WeekOutline> = Vec::with_capacity(total_weeks as usize);

    for week in 1..=total_weeks {
        let parsed_lectures = parsed
            .iter()
            .find(|w| w.week == week)
            .map(|w| w.lectures.as_slice())
            .unwrap_or_default();

        let lectures = (1..=lectures_per_week)
            .map(|number| LectureSlot {
                number,
                title: parsed_lectures
                    .get(number as usize - 1)
                    .map(|l| l.title.clone())
                    .unwrap_or_else(|| placeholder_title(week, number)),
            })
            .collect();

        weeks.push(WeekOutline { week, lectures });
    }

    Outline { weeks }
}

/// Parse and normalize, substituting the placeholder grid when the
/// structure cannot be parsed.
///
/// Returns the parse error alongside so the caller can log the degradation.
pub fn outline_or_placeholder(
    xml: &str,
    total_weeks: u32,
    lectures_per_week: u32,
) -> (Outline, Option<StructureParseError>) {
    match parse_outline(xml) {
        Ok(parsed) => (normalize_outline(parsed, total_weeks, lectures_per_week), None),
        Err(err) => (Outline::placeholder(total_weeks, lectures_per_week), Some(err)),
    }
}
