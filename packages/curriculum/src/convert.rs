//! Structural converters: records → canonical tagged text blocks.
//!
//! A record renders as one element per known field inside the record's root
//! tag. Absent fields that the model is meant to fill in are emitted as the
//! literal [`GENERATE`] marker; absent optional fields are left out. An empty
//! list renders as a self-closing "no existing items" marker so templates can
//! tell "nothing yet" from "forgot to pass the list".

use crate::error::ConverterError;

/// Placeholder telling the model to produce a value for this field.
pub const GENERATE: &str = "[GENERATE]";

/// How a field behaves when its value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Identifies the record. Required for list items; a generation target otherwise.
    Identity,
    /// Generation target: absent → `[GENERATE]`.
    Generate,
    /// Context only: absent → omitted.
    Optional,
}

/// One field of a record, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub tag: &'static str,
    pub kind: FieldKind,
    pub value: Option<String>,
}

impl FieldSpec {
    pub fn identity(tag: &'static str, value: Option<&str>) -> Self {
        Self::text(tag, FieldKind::Identity, value)
    }

    pub fn generate(tag: &'static str, value: Option<&str>) -> Self {
        Self::text(tag, FieldKind::Generate, value)
    }

    pub fn optional(tag: &'static str, value: Option<&str>) -> Self {
        Self::text(tag, FieldKind::Optional, value)
    }

    pub fn number(tag: &'static str, kind: FieldKind, value: Option<u32>) -> Self {
        Self {
            tag,
            kind,
            value: value.map(|v| v.to_string()),
        }
    }

    /// Blank strings count as absent.
    fn text(tag: &'static str, kind: FieldKind, value: Option<&str>) -> Self {
        Self {
            tag,
            kind,
            value: value.map(str::trim).filter(|v| !v.is_empty()).map(String::from),
        }
    }
}

/// A record that can be embedded in a prompt.
pub trait TaggedRecord {
    /// Root element name, e.g. `department`.
    const TAG: &'static str;

    /// Self-closing element emitted for an empty list, e.g. `no_existing_departments`.
    const EMPTY_MARKER: &'static str;

    /// Fields in rendering order.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Range checks on present values.
    fn validate(&self) -> Result<(), ConverterError> {
        Ok(())
    }
}

/// Render one record as a generation target.
pub fn to_tagged_block<R: TaggedRecord>(record: &R) -> Result<String, ConverterError> {
    record.validate()?;
    Ok(render_block(R::TAG, record.fields()))
}

/// Render a list of existing records.
///
/// Every item must carry its identity fields; an empty list renders as
/// `<{EMPTY_MARKER}/>`.
pub fn to_tagged_list<R: TaggedRecord>(records: &[R]) -> Result<String, ConverterError> {
    if records.is_empty() {
        return Ok(empty_marker::<R>());
    }

    let mut blocks = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        record.validate()?;
        let fields = record.fields();
        if let Some(missing) = fields
            .iter()
            .find(|f| f.kind == FieldKind::Identity && f.value.is_none())
        {
            return Err(ConverterError::MissingField {
                entity: R::TAG,
                field: missing.tag,
                index,
            });
        }
        blocks.push(render_block(R::TAG, fields));
    }
    Ok(blocks.join("\n"))
}

/// The marker an empty list of `R` renders as.
pub fn empty_marker<R: TaggedRecord>() -> String {
    format!("<{}/>", R::EMPTY_MARKER)
}

fn render_block(tag: &str, fields: Vec<FieldSpec>) -> String {
    let mut out = format!("<{}>\n", tag);
    for field in fields {
        let value = match (field.value, field.kind) {
            (Some(value), _) => value,
            (None, FieldKind::Identity | FieldKind::Generate) => GENERATE.to_string(),
            (None, FieldKind::Optional) => continue,
        };
        out.push_str(&format!("  <{0}>{1}</{0}>\n", field.tag, value));
    }
    out.push_str(&format!("</{}>", tag));
    out
}

/// Reject zero for 1-indexed numbers.
pub(crate) fn require_positive(
    entity: &'static str,
    field: &'static str,
    value: Option<u32>,
) -> Result<(), ConverterError> {
    match value {
        Some(0) => Err(ConverterError::InvalidField {
            entity,
            field,
            reason: "must be 1 or greater".to_string(),
        }),
        _ => Ok(()),
    }
}
