//! Tag extraction from raw generator output.
//!
//! Finds `<tag>…</tag>` blocks in free text. Matching is non-greedy and spans
//! newlines; anything around the block (commentary, code fences) is ignored.
//! There is no nesting awareness: the first match at the level you search is
//! returned, so callers that care about nesting extract the outer block first
//! and search inside it.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use regex::Regex;

use crate::error::GenerationError;

/// Characters of raw output kept in extraction errors.
pub const EXCERPT_CHARS: usize = 200;

/// One occurrence of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Raw attribute text of the opening tag (may be empty).
    pub attributes: String,
    /// Trimmed inner text, child tags included verbatim.
    pub inner: String,
}

impl Element {
    /// Value of attribute `name`, quoted or bare.
    pub fn attr(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }
}

/// Compiled element patterns, keyed by tag name.
static ELEMENTS: LazyLock<RwLock<HashMap<String, Regex>>> = LazyLock::new(Default::default);

/// One `name=value` pair; values may be double-quoted, single-quoted or bare.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

fn element_regex(tag: &str) -> Option<Regex> {
    if let Some(re) = ELEMENTS.read().ok().and_then(|cache| cache.get(tag).cloned()) {
        return Some(re);
    }

    // Quoted attribute values may contain `/` or `>`; a bare `/` means self-closing
    let escaped = regex::escape(tag);
    let re = Regex::new(&format!(
        r#"(?s)<{escaped}(\s(?:[^>"'/]|"[^"]*"|'[^']*')*)?>(.*?)</{escaped}\s*>"#
    ))
    .ok()?;

    if let Ok(mut cache) = ELEMENTS.write() {
        cache.insert(tag.to_string(), re.clone());
    }
    Some(re)
}

/// Trimmed inner text of the first `<tag>…</tag>` in `text`.
///
/// Attributes on the opening tag are tolerated. Returns `None` when the tag
/// is absent; an empty block yields `Some("")`.
pub fn extract_tag(text: &str, tag: &str) -> Option<String> {
    let caps = element_regex(tag)?.captures(text)?;
    caps.get(2).map(|m| m.as_str().trim().to_string())
}

/// Every non-overlapping `<tag>…</tag>` in `text`, in document order.
pub fn extract_all(text: &str, tag: &str) -> Vec<Element> {
    let Some(re) = element_regex(tag) else {
        return Vec::new();
    };
    re.captures_iter(text)
        .map(|caps| Element {
            attributes: caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
            inner: caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

/// Value of `name` in a raw attribute string such as `number="3" kind='x'`.
pub fn attribute<'a>(attributes: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE
        .captures_iter(attributes)
        .find(|caps| caps.get(1).is_some_and(|n| n.as_str() == name))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)))
        .map(|m| m.as_str().trim())
}

/// `text` with every `<tag>…</tag>` block removed.
///
/// Lets callers read a record's own fields without picking up same-named
/// fields from a nested block.
pub fn strip_tag(text: &str, tag: &str) -> String {
    match element_regex(tag) {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

/// Like [`extract_tag`], but a missing or blank block is an error carrying
/// the tag name and the start of the raw text.
pub fn require_tag(text: &str, tag: &str) -> Result<String, GenerationError> {
    match extract_tag(text, tag) {
        Some(inner) if !inner.is_empty() => Ok(inner),
        _ => Err(GenerationError::Extraction {
            tag: tag.to_string(),
            excerpt: excerpt(text),
        }),
    }
}

/// First [`EXCERPT_CHARS`] characters of `text`.
pub fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((end, _)) => format!("{}…", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}
