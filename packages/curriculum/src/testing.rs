//! Testing utilities including a mock text generator.
//!
//! Lets applications exercise the generation pipeline without making real
//! model calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::BoxError;
use crate::traits::generator::TextGenerator;

/// A mock generator that replays canned responses.
///
/// Queued responses are returned in order; once the queue is empty the
/// fallback response (if any) is returned for every call.
#[derive(Default, Clone)]
pub struct MockGenerator {
    /// Responses returned one per call
    queue: Arc<RwLock<VecDeque<String>>>,

    /// Returned when the queue is empty
    fallback: Option<String>,

    /// When set, every call fails with this message
    failure: Option<String>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockGeneratorCall>>>,
}

/// Record of a call made to the mock generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockGeneratorCall {
    pub prompt: String,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered call.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.queue.write().unwrap().push_back(response.into());
        self
    }

    /// Response used once the queue is exhausted.
    pub fn with_fallback(mut self, response: impl Into<String>) -> Self {
        self.fallback = Some(response.into());
        self
    }

    /// Make every call fail.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockGeneratorCall> {
        self.calls.read().unwrap().clone()
    }

    /// Prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.read().unwrap().last().map(|c| c.prompt.clone())
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        system_prompt: Option<&str>,
    ) -> Result<String, BoxError> {
        self.calls.write().unwrap().push(MockGeneratorCall {
            prompt: prompt.to_string(),
            model: model.map(String::from),
            system_prompt: system_prompt.map(String::from),
        });

        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }

        let queued = self.queue.write().unwrap().pop_front();
        queued
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| "mock generator has no response queued".into())
    }
}
