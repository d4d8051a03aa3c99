//! Error types for the LLM client.

use thiserror::Error;

use crate::backend::Backend;

/// Result type for LLM client operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration error (missing API key, bad model reference)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model identifier is neither registered nor an explicit `backend:model` reference
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Network error (connection failed, timeout)
    #[error("Network error ({backend}): {message}")]
    Network { backend: Backend, message: String },

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error ({backend}, status {status}): {body}")]
    Api {
        backend: Backend,
        status: u16,
        body: String,
    },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error ({backend}): {message}")]
    Parse { backend: Backend, message: String },

    /// The backend answered but produced no text
    #[error("Empty response from {0}")]
    EmptyResponse(Backend),
}
