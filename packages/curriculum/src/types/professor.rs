//! Professor record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::{FieldKind, FieldSpec, TaggedRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    /// Academic title, e.g. "Associate Professor"
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub teaching_style: Option<String>,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    /// Department name resolved by the caller
    #[serde(default)]
    pub department_name: Option<String>,
}

impl Professor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    pub fn with_department(mut self, id: Option<Uuid>, name: impl Into<String>) -> Self {
        self.department_id = id;
        self.department_name = Some(name.into());
        self
    }
}

impl TaggedRecord for Professor {
    const TAG: &'static str = "professor";
    const EMPTY_MARKER: &'static str = "no_existing_professors";

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::identity("name", self.name.as_deref()),
            FieldSpec::generate("title", self.title.as_deref()),
            FieldSpec::generate("specialization", self.specialization.as_deref()),
            FieldSpec::generate("gender", self.gender.as_deref()),
            FieldSpec::number("age", FieldKind::Generate, self.age),
            FieldSpec::generate("accent", self.accent.as_deref()),
            FieldSpec::generate("description", self.description.as_deref()),
            FieldSpec::generate("background", self.background.as_deref()),
            FieldSpec::generate("personality", self.personality.as_deref()),
            FieldSpec::generate("teaching_style", self.teaching_style.as_deref()),
            FieldSpec::optional("department", self.department_name.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{to_tagged_block, to_tagged_list};

    #[test]
    fn test_professor_target_block() {
        let professor = Professor::default()
            .with_specialization("Machine Learning")
            .with_department(None, "Computer Science");
        let block = to_tagged_block(&professor).unwrap();

        assert!(block.contains("<name>[GENERATE]</name>"));
        assert!(block.contains("<specialization>Machine Learning</specialization>"));
        assert!(block.contains("<age>[GENERATE]</age>"));
        assert!(block.contains("<department>Computer Science</department>"));
    }

    #[test]
    fn test_empty_professor_list() {
        let professors: Vec<Professor> = Vec::new();
        assert_eq!(
            to_tagged_list(&professors).unwrap(),
            "<no_existing_professors/>"
        );
    }
}
