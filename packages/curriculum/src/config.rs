use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::generate::GenerationSettings;

pub const DEFAULT_MODEL: &str = "anthropic:claude-3-5-sonnet-latest";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// `backend:model` used when a call names no model
    pub default_model: String,
    pub system_prompt: Option<String>,
    /// `alias=backend:model` list
    pub model_aliases: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub ollama_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match var("CURRICULUM_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("CURRICULUM_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            default_model: var("CURRICULUM_DEFAULT_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_prompt: var("CURRICULUM_SYSTEM_PROMPT"),
            model_aliases: var("CURRICULUM_MODEL_ALIASES"),
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            openai_api_key: var("OPENAI_API_KEY"),
            ollama_base_url: var("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Settings for a [`CurriculumGenerator`](crate::generate::CurriculumGenerator).
    ///
    /// The model is left unset so the client's registry default applies.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: None,
            system_prompt: self.system_prompt.clone(),
        }
    }

    /// Build the model registry from the default model and aliases.
    #[cfg(feature = "llm")]
    pub fn model_registry(&self) -> Result<llm_client::ModelRegistry> {
        let default: llm_client::ModelRef = self
            .default_model
            .parse()
            .with_context(|| format!("invalid CURRICULUM_DEFAULT_MODEL '{}'", self.default_model))?;

        let registry = llm_client::ModelRegistry::new(default);
        match &self.model_aliases {
            Some(aliases) => registry
                .with_aliases(aliases)
                .context("invalid CURRICULUM_MODEL_ALIASES"),
            None => Ok(registry),
        }
    }

    /// Build an LLM client with every configured credential.
    #[cfg(feature = "llm")]
    pub fn llm_client(&self) -> Result<llm_client::LlmClient> {
        let mut client = llm_client::LlmClient::new(self.model_registry()?)
            .with_ollama_base_url(&self.ollama_base_url)
            .with_timeout(self.request_timeout)
            .context("failed to build LLM client")?;

        if let Some(key) = &self.anthropic_api_key {
            client = client.with_anthropic_key(key);
        }
        if let Some(key) = &self.openai_api_key {
            client = client.with_openai_key(key);
        }
        Ok(client)
    }
}
