//! Department record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::{FieldSpec, TaggedRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = Some(faculty.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TaggedRecord for Department {
    const TAG: &'static str = "department";
    const EMPTY_MARKER: &'static str = "no_existing_departments";

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::identity("name", self.name.as_deref()),
            FieldSpec::optional("code", self.code.as_deref()),
            FieldSpec::optional("faculty", self.faculty.as_deref()),
            FieldSpec::generate("description", self.description.as_deref()),
        ]
    }
}
