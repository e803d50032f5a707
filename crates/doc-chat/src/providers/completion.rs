//! Completion provider trait for the hosted chat model

use async_trait::async_trait;

use crate::error::Result;

/// Trait for single-shot chat completion
///
/// Implementations:
/// - `OpenAiCompletion`: OpenAI-compatible `/chat/completions`
/// - `OllamaCompletion`: Local Ollama server `/api/chat`
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a system instruction and a user prompt, returning the reply text.
    ///
    /// Failures of any kind surface as `Error::UpstreamFailure`; implementations
    /// must not retry.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
