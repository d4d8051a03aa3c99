//! Topic record: one slot of a course outline once persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::{require_positive, FieldKind, FieldSpec, TaggedRecord};
use crate::error::ConverterError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub course_id: Option<Uuid>,
    /// 1-indexed
    #[serde(default)]
    pub week_number: Option<u32>,
    /// 1-indexed position within the week
    #[serde(default)]
    pub order_in_week: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Topic {
    pub fn new(title: impl Into<String>, week_number: u32, order_in_week: u32) -> Self {
        Self {
            title: Some(title.into()),
            week_number: Some(week_number),
            order_in_week: Some(order_in_week),
            ..Default::default()
        }
    }
}

impl TaggedRecord for Topic {
    const TAG: &'static str = "topic";
    const EMPTY_MARKER: &'static str = "no_existing_topics";

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::identity("title", self.title.as_deref()),
            FieldSpec::number("week", FieldKind::Optional, self.week_number),
            FieldSpec::number("order", FieldKind::Optional, self.order_in_week),
            FieldSpec::optional("description", self.description.as_deref()),
        ]
    }

    fn validate(&self) -> Result<(), ConverterError> {
        require_positive(Self::TAG, "week_number", self.week_number)?;
        require_positive(Self::TAG, "order_in_week", self.order_in_week)
    }
}
