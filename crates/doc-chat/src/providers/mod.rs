//! Provider abstractions for the completion service and document storage
//!
//! This module provides trait-based abstractions that allow switching between
//! hosted (OpenAI) and local (Ollama) completion backends.

pub mod completion;
pub mod document_store;
pub mod ollama;
pub mod openai;
pub mod sqlite;

use std::sync::Arc;

use crate::config::{CompletionBackend, CompletionConfig};
use crate::error::Result;

pub use completion::CompletionProvider;
pub use document_store::DocumentStore;
pub use ollama::OllamaCompletion;
pub use openai::OpenAiCompletion;
pub use sqlite::SqliteDocumentStore;

/// Build the completion provider selected by configuration
pub fn completion_from_config(config: &CompletionConfig) -> Result<Arc<dyn CompletionProvider>> {
    let provider: Arc<dyn CompletionProvider> = match config.backend {
        CompletionBackend::OpenAi => Arc::new(OpenAiCompletion::new(config)?),
        CompletionBackend::Ollama => Arc::new(OllamaCompletion::new(config)?),
    };
    tracing::info!(
        "Completion backend: {} (model: {})",
        provider.name(),
        provider.model()
    );
    Ok(provider)
}
