//! Course record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::{FieldKind, FieldSpec, TaggedRecord};
use crate::error::ConverterError;
use crate::outline::Outline;

pub const DEFAULT_TOTAL_WEEKS: u32 = 14;
pub const DEFAULT_LECTURES_PER_WEEK: u32 = 2;

fn default_total_weeks() -> u32 {
    DEFAULT_TOTAL_WEEKS
}

fn default_lectures_per_week() -> u32 {
    DEFAULT_LECTURES_PER_WEEK
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// e.g. "Undergraduate", "Graduate"
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default = "default_lectures_per_week")]
    pub lectures_per_week: u32,
    #[serde(default = "default_total_weeks")]
    pub total_weeks: u32,
    #[serde(default)]
    pub outline: Option<Outline>,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    #[serde(default)]
    pub professor_id: Option<Uuid>,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            title: None,
            description: None,
            level: None,
            credits: None,
            lectures_per_week: DEFAULT_LECTURES_PER_WEEK,
            total_weeks: DEFAULT_TOTAL_WEEKS,
            outline: None,
            department_id: None,
            professor_id: None,
        }
    }
}

impl Course {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set the outline grid size.
    pub fn with_schedule(mut self, total_weeks: u32, lectures_per_week: u32) -> Self {
        self.total_weeks = total_weeks;
        self.lectures_per_week = lectures_per_week;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }
}

impl TaggedRecord for Course {
    const TAG: &'static str = "course";
    const EMPTY_MARKER: &'static str = "no_existing_courses";

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::optional("code", self.code.as_deref()),
            FieldSpec::identity("title", self.title.as_deref()),
            FieldSpec::generate("description", self.description.as_deref()),
            FieldSpec::generate("level", self.level.as_deref()),
            FieldSpec::number("credits", FieldKind::Generate, self.credits),
            FieldSpec::number("lectures_per_week", FieldKind::Optional, Some(self.lectures_per_week)),
            FieldSpec::number("total_weeks", FieldKind::Optional, Some(self.total_weeks)),
            FieldSpec::optional(
                "outline",
                self.outline.as_ref().map(Outline::to_xml).as_deref(),
            ),
        ]
    }

    fn validate(&self) -> Result<(), ConverterError> {
        for (field, value) in [
            ("total_weeks", self.total_weeks),
            ("lectures_per_week", self.lectures_per_week),
        ] {
            if value == 0 {
                return Err(ConverterError::InvalidField {
                    entity: Self::TAG,
                    field,
                    reason: "must be 1 or greater".to_string(),
                });
            }
        }
        Ok(())
    }
}
