//! Minimal multi-backend chat completion client.
//!
//! One request shape, three wire formats. The backend is carried explicitly
//! by every [`ModelRef`]; bare model names are resolved through the
//! [`ModelRegistry`] given at construction.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{Backend, CompletionRequest, LlmClient, ModelRef, ModelRegistry};
//!
//! let registry = ModelRegistry::new(ModelRef::new(Backend::Anthropic, "claude-3-5-sonnet-latest"))
//!     .with_aliases("fast=openai:gpt-4o-mini")?;
//!
//! let client = LlmClient::new(registry)
//!     .with_anthropic_key(std::env::var("ANTHROPIC_API_KEY")?);
//!
//! let completion = client
//!     .complete(CompletionRequest::new("Hello!").system("Be brief"))
//!     .await?;
//! ```

pub mod backend;
pub mod error;
pub mod types;

pub use backend::{Backend, ModelRef, ModelRegistry};
pub use error::{LlmError, Result};
pub use types::*;

use std::time::{Duration, Instant};

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Chat completion client for every supported backend.
#[derive(Clone)]
pub struct LlmClient {
    http_client: Client,
    registry: ModelRegistry,
    openai_api_key: Option<String>,
    anthropic_api_key: Option<String>,
    openai_base_url: String,
    anthropic_base_url: String,
    ollama_base_url: String,
}

impl LlmClient {
    /// Create a client with no credentials configured.
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            http_client: Client::new(),
            registry,
            openai_api_key: None,
            anthropic_api_key: None,
            openai_base_url: OPENAI_BASE_URL.to_string(),
            anthropic_base_url: ANTHROPIC_BASE_URL.to_string(),
            ollama_base_url: OLLAMA_BASE_URL.to_string(),
        }
    }

    pub fn with_openai_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_anthropic_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    /// Set a custom OpenAI-compatible base URL (Azure, proxies, etc.).
    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = trim_slash(url.into());
        self
    }

    pub fn with_anthropic_base_url(mut self, url: impl Into<String>) -> Self {
        self.anthropic_base_url = trim_slash(url.into());
        self
    }

    pub fn with_ollama_base_url(mut self, url: impl Into<String>) -> Self {
        self.ollama_base_url = trim_slash(url.into());
        self
    }

    /// Apply a whole-request timeout to every call.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Resolve a model identifier through the registry.
    pub fn resolve_model(&self, id: Option<&str>) -> Result<ModelRef> {
        self.registry.resolve(id)
    }

    /// Backends with the credentials they need.
    pub fn available_backends(&self) -> Vec<Backend> {
        Backend::ALL
            .into_iter()
            .filter(|b| self.api_key(*b).is_ok())
            .collect()
    }

    /// Run a single-turn completion.
    pub async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let model = match &request.model {
            Some(model) => model.clone(),
            None => self.registry.default_model().clone(),
        };
        let start = Instant::now();

        let (content, usage) = match model.backend {
            Backend::OpenAi => {
                let body = OpenAiChatRequest::from_request(&request, &model.model);
                let url = format!("{}/chat/completions", self.openai_base_url);
                let raw: OpenAiChatResponse =
                    self.post_json(model.backend, &url, &body).await?;
                raw.into_parts()?
            }
            Backend::Anthropic => {
                let body = AnthropicMessagesRequest::from_request(&request, &model.model);
                let url = format!("{}/messages", self.anthropic_base_url);
                let raw: AnthropicMessagesResponse =
                    self.post_json(model.backend, &url, &body).await?;
                raw.into_parts()?
            }
            Backend::Ollama => {
                let body = OllamaChatRequest::from_request(&request, &model.model);
                let url = format!("{}/api/chat", self.ollama_base_url);
                let raw: OllamaChatResponse = self.post_json(model.backend, &url, &body).await?;
                raw.into_parts()?
            }
        };

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            output_len = content.len(),
            "LLM completion"
        );

        Ok(Completion {
            content,
            model,
            usage,
        })
    }

    fn api_key(&self, backend: Backend) -> Result<Option<&str>> {
        let key = match backend {
            Backend::OpenAi => self.openai_api_key.as_deref(),
            Backend::Anthropic => self.anthropic_api_key.as_deref(),
            Backend::Ollama => return Ok(None),
        };
        match key {
            Some(key) if !key.is_empty() => Ok(Some(key)),
            _ => Err(LlmError::Config(format!("no API key configured for {}", backend))),
        }
    }

    fn headers(&self, backend: Backend) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let Some(key) = self.api_key(backend)? else {
            return Ok(headers);
        };
        let invalid =
            |_: InvalidHeaderValue| LlmError::Config(format!("API key for {} is not a valid header", backend));

        match backend {
            Backend::OpenAi => {
                let value = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid)?;
                headers.insert(AUTHORIZATION, value);
            }
            Backend::Anthropic => {
                headers.insert(
                    HeaderName::from_static("x-api-key"),
                    HeaderValue::from_str(key).map_err(invalid)?,
                );
                headers.insert(
                    HeaderName::from_static("anthropic-version"),
                    HeaderValue::from_static(ANTHROPIC_API_VERSION),
                );
            }
            Backend::Ollama => {}
        }
        Ok(headers)
    }

    async fn post_json<B, R>(&self, backend: Backend, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(url)
            .headers(self.headers(backend)?)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(backend = %backend, error = %e, "LLM request failed");
                LlmError::Network {
                    backend,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(backend = %backend, status = %status, error = %error_text, "LLM API error");
            return Err(LlmError::Api {
                backend,
                status: status.as_u16(),
                body: truncate_to_char_boundary(&error_text, 2000).to_string(),
            });
        }

        response.json().await.map_err(|e| LlmError::Parse {
            backend,
            message: e.to_string(),
        })
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
