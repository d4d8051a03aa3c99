//! [`TextGenerator`] backed by [`llm_client::LlmClient`].
//!
//! Model identifiers go through the client's registry, so `"fast"`,
//! `"claude-3-5-sonnet-latest"` and `"ollama:llama3"` all work as long as
//! they were registered or carry an explicit backend.

use async_trait::async_trait;
use llm_client::{CompletionRequest, LlmClient};
use tracing::debug;

use crate::error::BoxError;
use crate::traits::generator::TextGenerator;

pub use llm_client;

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        system_prompt: Option<&str>,
    ) -> Result<String, BoxError> {
        let model = self.resolve_model(model)?;
        debug!(backend = %model.backend, model = %model.model, "Resolved model");

        let mut request = CompletionRequest::new(prompt).model(model);
        if let Some(system) = system_prompt {
            request = request.system(system);
        }

        let completion = self.complete(request).await?;
        Ok(completion.content)
    }
}
