//! Text generator trait.
//!
//! The generation pipeline only needs "prompt in, text out". Implementations
//! wrap specific providers and own any retry, timeout, or rate-limit policy;
//! the pipeline calls each generator exactly once per request.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;

/// Produces free text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    ///
    /// `model` is a provider-specific identifier; `None` means the
    /// implementation's default. `system_prompt` is sent as the system turn
    /// where the provider supports one.
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        system_prompt: Option<&str>,
    ) -> Result<String, BoxError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        system_prompt: Option<&str>,
    ) -> Result<String, BoxError> {
        (**self).generate_text(prompt, model, system_prompt).await
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        system_prompt: Option<&str>,
    ) -> Result<String, BoxError> {
        (**self).generate_text(prompt, model, system_prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate_text(
            &self,
            prompt: &str,
            model: Option<&str>,
            _system_prompt: Option<&str>,
        ) -> Result<String, BoxError> {
            Ok(format!("{}:{}", model.unwrap_or("default"), prompt))
        }
    }

    #[tokio::test]
    async fn test_shared_generators_delegate() {
        let shared: Arc<dyn TextGenerator> = Arc::new(Echo);
        assert_eq!(
            shared.generate_text("hi", None, None).await.unwrap(),
            "default:hi"
        );

        let boxed: Box<dyn TextGenerator> = Box::new(Echo);
        assert_eq!(
            boxed.generate_text("hi", Some("m"), None).await.unwrap(),
            "m:hi"
        );
    }
}
