//! Prompt templates with a required-variable contract.
//!
//! Placeholders are `{name}`; `{{` and `}}` produce literal braces. Rendering
//! checks every required variable up front and reports all of the missing
//! ones at once, before any substitution happens.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::TemplateError;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}|[{}]").unwrap()
});

/// Values supplied at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Add a value only when present.
    pub fn with_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = TemplateVars::new();
        for (k, v) in iter {
            vars.set(k, v);
        }
        vars
    }
}

/// A named template and the variables it cannot render without.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: Cow<'static, str>,
    text: Cow<'static, str>,
    required: Cow<'static, [&'static str]>,
}

impl PromptTemplate {
    /// Build a template from static parts (usable in `static` items).
    pub const fn from_static(
        name: &'static str,
        text: &'static str,
        required: &'static [&'static str],
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            text: Cow::Borrowed(text),
            required: Cow::Borrowed(required),
        }
    }

    /// Build a template from owned text.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        required: Vec<&'static str>,
    ) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            text: Cow::Owned(text.into()),
            required: Cow::Owned(required),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn required(&self) -> &[&'static str] {
        &self.required
    }

    /// Placeholder names referenced by the text, in first-seen order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for caps in TOKEN.captures_iter(&self.text) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// SHA-256 of the template text, for tying output to a prompt version.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Render with `vars`.
    ///
    /// Fails with [`TemplateError::MissingVariables`] when any required name
    /// is absent, and with [`TemplateError::UnknownPlaceholder`] when the
    /// text references a name that was not supplied.
    pub fn render(&self, vars: &TemplateVars) -> Result<String, TemplateError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| !vars.contains(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TemplateError::MissingVariables {
                template: self.name.to_string(),
                missing,
            });
        }

        let text: &str = &self.text;
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in TOKEN.captures_iter(text) {
            let Some(token) = caps.get(0) else { continue };
            out.push_str(&text[last..token.start()]);
            last = token.end();

            match (token.as_str(), caps.get(1)) {
                ("{{", _) => out.push('{'),
                ("}}", _) => out.push('}'),
                (_, Some(name)) => match vars.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UnknownPlaceholder {
                            template: self.name.to_string(),
                            name: name.as_str().to_string(),
                        })
                    }
                },
                _ => {
                    return Err(TemplateError::Malformed {
                        template: self.name.to_string(),
                        position: token.start(),
                    })
                }
            }
        }

        out.push_str(&text[last..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GREETING: PromptTemplate = PromptTemplate::from_static(
        "greeting",
        "Hello {name}, welcome to {course}.",
        &["name", "course"],
    );

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let vars = TemplateVars::new()
            .with("name", "Ada")
            .with("course", "CS101");

        assert_eq!(
            GREETING.render(&vars).unwrap(),
            "Hello Ada, welcome to CS101."
        );
    }

    #[test]
    fn test_missing_variables_are_all_reported() {
        let err = GREETING.render(&TemplateVars::new()).unwrap_err();

        assert_eq!(
            err,
            TemplateError::MissingVariables {
                template: "greeting".to_string(),
                missing: vec!["name".to_string(), "course".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_check_runs_before_unknown_placeholders() {
        let template = PromptTemplate::new("t", "{a} {b} {c}", vec!["a"]);
        let err = template.render(&TemplateVars::new().with("b", "x")).unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariables { .. }));
    }

    #[test]
    fn test_unknown_placeholder_is_distinct() {
        let template = PromptTemplate::new("t", "{a} {level}", vec!["a"]);
        let err = template.render(&TemplateVars::new().with("a", "1")).unwrap_err();

        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                template: "t".to_string(),
                name: "level".to_string(),
            }
        );
    }

    #[test]
    fn test_optional_placeholder_renders_when_supplied() {
        let template = PromptTemplate::new("t", "{a}{extra}", vec!["a"]);
        let vars = TemplateVars::new().with("a", "1").with("extra", "2");
        assert_eq!(template.render(&vars).unwrap(), "12");
    }

    #[test]
    fn test_escaped_braces() {
        let template = PromptTemplate::new("t", "{{\"key\": \"{value}\"}}", vec!["value"]);
        let rendered = template
            .render(&TemplateVars::new().with("value", "v"))
            .unwrap();
        assert_eq!(rendered, "{\"key\": \"v\"}");
    }

    #[test]
    fn test_stray_brace_is_malformed() {
        let template = PromptTemplate::new("t", "a { b", vec![]);
        assert_eq!(
            template.render(&TemplateVars::new()).unwrap_err(),
            TemplateError::Malformed {
                template: "t".to_string(),
                position: 2,
            }
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = PromptTemplate::new("t", "{a}", vec!["a"]);
        let rendered = template
            .render(&TemplateVars::new().with("a", "{b}"))
            .unwrap();
        assert_eq!(rendered, "{b}");
    }

    #[test]
    fn test_placeholders_in_order_without_duplicates() {
        let template = PromptTemplate::new("t", "{b} {a} {b} {{c}}", vec![]);
        assert_eq!(template.placeholders(), vec!["b", "a"]);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let hash1 = GREETING.fingerprint();
        let hash2 = GREETING.clone().fingerprint();
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 hex
        assert_ne!(hash1, PromptTemplate::new("g", "other", vec![]).fingerprint());
    }

    const POOL: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

    proptest! {
        #[test]
        fn prop_missing_names_reported_exactly(supplied in proptest::collection::vec(any::<bool>(), 5)) {
            let text = POOL.iter().map(|n| format!("[{{{}}}]", n)).collect::<String>();
            let template = PromptTemplate::new("pool", text, POOL.to_vec());

            let vars: TemplateVars = POOL
                .iter()
                .zip(&supplied)
                .filter(|(_, s)| **s)
                .map(|(n, _)| (*n, "value"))
                .collect();
            let expected: Vec<String> = POOL
                .iter()
                .zip(&supplied)
                .filter(|(_, s)| !**s)
                .map(|(n, _)| n.to_string())
                .collect();

            match template.render(&vars) {
                Ok(rendered) => {
                    prop_assert!(expected.is_empty());
                    for name in POOL {
                        let placeholder = format!("{{{}}}", name);
                        prop_assert!(!rendered.contains(&placeholder));
                    }
                }
                Err(TemplateError::MissingVariables { missing, .. }) => {
                    prop_assert_eq!(missing, expected);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
