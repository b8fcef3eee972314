//! Content generator port - the generative text backend
//!
//! One prompt in, raw text out. Implementations do not retry; every failure
//! reaches the caller immediately, classified so quota exhaustion can be
//! told apart from an unreachable or slow service.

use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

#[async_trait]
impl<T: ContentGenerator + ?Sized> ContentGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        (**self).generate(prompt).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    #[error("generation service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("generation quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("generation request timed out")]
    Timeout,
}
