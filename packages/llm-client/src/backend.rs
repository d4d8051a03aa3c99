//! Backend selection.
//!
//! Every model the client talks to is an explicit `(backend, model)` pair.
//! Short names and aliases are resolved once through a [`ModelRegistry`]
//! built at configuration time, never by sniffing model-name prefixes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};

/// Supported completion backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    OpenAi,
    Anthropic,
    Ollama,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::OpenAi, Backend::Anthropic, Backend::Ollama];

    /// Tag used in `backend:model` references.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenAi => "openai",
            Backend::Anthropic => "anthropic",
            Backend::Ollama => "ollama",
        }
    }

    /// Whether the backend needs an API key to be usable.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Backend::Ollama)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Backend::OpenAi),
            "anthropic" | "claude" => Ok(Backend::Anthropic),
            "ollama" => Ok(Backend::Ollama),
            other => Err(LlmError::Config(format!("unknown backend '{}'", other))),
        }
    }
}

/// A model on a specific backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef {
    pub backend: Backend,
    pub model: String,
}

impl ModelRef {
    pub fn new(backend: Backend, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend, self.model)
    }
}

impl FromStr for ModelRef {
    type Err = LlmError;

    /// Parse `backend:model`. Only the first colon separates, so Ollama
    /// tags such as `ollama:llama3:8b` keep their own colon.
    fn from_str(s: &str) -> Result<Self> {
        let (backend, model) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| LlmError::UnknownModel(s.to_string()))?;
        let model = model.trim();
        if model.is_empty() {
            return Err(LlmError::Config(format!("missing model name in '{}'", s)));
        }
        Ok(Self::new(backend.parse()?, model))
    }
}

/// Maps model identifiers (aliases or bare names) to explicit backends.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    default: ModelRef,
    entries: HashMap<String, ModelRef>,
}

impl ModelRegistry {
    /// Create a registry whose fallback model is `default`.
    pub fn new(default: ModelRef) -> Self {
        let mut entries = HashMap::new();
        entries.insert(default.model.clone(), default.clone());
        Self { default, entries }
    }

    /// Register an identifier.
    pub fn with_model(mut self, id: impl Into<String>, model: ModelRef) -> Self {
        self.entries.insert(id.into(), model);
        self
    }

    /// Register aliases from a `alias=backend:model,alias2=backend:model` list.
    pub fn with_aliases(mut self, spec: &str) -> Result<Self> {
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (alias, target) = entry.split_once('=').ok_or_else(|| {
                LlmError::Config(format!("alias entry '{}' is not alias=backend:model", entry))
            })?;
            let alias = alias.trim();
            if alias.is_empty() {
                return Err(LlmError::Config(format!("empty alias in '{}'", entry)));
            }
            self.entries.insert(alias.to_string(), target.parse()?);
        }
        Ok(self)
    }

    pub fn default_model(&self) -> &ModelRef {
        &self.default
    }

    /// Resolve an optional model identifier.
    ///
    /// `None` yields the default model; registered identifiers win over
    /// explicit `backend:model` parsing.
    pub fn resolve(&self, id: Option<&str>) -> Result<ModelRef> {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(self.default.clone());
        };

        if let Some(model) = self.entries.get(id) {
            return Ok(model.clone());
        }

        id.parse()
            .map_err(|_| LlmError::UnknownModel(id.to_string()))
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
