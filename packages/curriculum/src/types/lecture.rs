//! Lecture record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::{require_positive, FieldKind, FieldSpec, TaggedRecord};
use crate::error::ConverterError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub course_id: Option<Uuid>,
    #[serde(default)]
    pub topic_id: Option<Uuid>,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default)]
    pub order_in_week: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    /// Full lecture text
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

impl Lecture {
    pub fn new(title: impl Into<String>, week_number: u32, order_in_week: u32) -> Self {
        Self {
            title: Some(title.into()),
            week_number: Some(week_number),
            order_in_week: Some(order_in_week),
            ..Default::default()
        }
    }
}

impl TaggedRecord for Lecture {
    const TAG: &'static str = "lecture";
    const EMPTY_MARKER: &'static str = "no_existing_lectures";

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::identity("title", self.title.as_deref()),
            FieldSpec::number("week", FieldKind::Optional, self.week_number),
            FieldSpec::number("order", FieldKind::Optional, self.order_in_week),
            FieldSpec::generate("description", self.description.as_deref()),
            FieldSpec::generate("content", self.content.as_deref()),
        ]
    }

    fn validate(&self) -> Result<(), ConverterError> {
        require_positive(Self::TAG, "week_number", self.week_number)?;
        require_positive(Self::TAG, "order_in_week", self.order_in_week)
    }
}
