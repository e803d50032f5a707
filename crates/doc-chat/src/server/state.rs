//! Application state for the document chat server

use axum::http::HeaderMap;
use std::sync::Arc;

use crate::config::{AccessMode, AppConfig};
use crate::error::{Error, Result};
use crate::generation::ChatPipeline;
use crate::ingestion::IngestPipeline;
use crate::providers::{
    completion_from_config, CompletionProvider, DocumentStore, SqliteDocumentStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Document text storage
    store: Arc<dyn DocumentStore>,
    /// Completion backend (OpenAI or Ollama)
    completion: Arc<dyn CompletionProvider>,
    /// File -> text pipeline
    ingest: IngestPipeline,
    /// Question + documents -> answer pipeline
    chat: ChatPipeline,
}

impl AppState {
    /// Open storage and build providers from configuration
    pub async fn new(config: AppConfig) -> Result<Self> {
        tracing::info!(
            "Initializing application state (database: {})",
            config.storage.database_path.display()
        );

        let store = Arc::new(SqliteDocumentStore::open(&config.storage.database_path)?);
        let completion = completion_from_config(&config.completion)?;

        Ok(Self::with_providers(config, store, completion))
    }

    /// Build state around already constructed providers
    pub fn with_providers(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        let ingest = IngestPipeline::new(&config.ingestion);
        let chat = ChatPipeline::new(
            Arc::clone(&store),
            Arc::clone(&completion),
            config.chat.empty_documents,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                completion,
                ingest,
                chat,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get document store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.store
    }

    /// Get completion provider
    pub fn completion(&self) -> &Arc<dyn CompletionProvider> {
        &self.inner.completion
    }

    pub fn ingest(&self) -> &IngestPipeline {
        &self.inner.ingest
    }

    pub fn chat(&self) -> &ChatPipeline {
        &self.inner.chat
    }

    /// Resolve the principal for a request.
    ///
    /// Public mode always yields `None`. Scoped mode requires a non-empty
    /// principal header.
    pub fn principal(&self, headers: &HeaderMap) -> Result<Option<String>> {
        let access = &self.inner.config.access;
        if access.mode == AccessMode::Public {
            return Ok(None);
        }

        headers
            .get(access.principal_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Some(v.to_string()))
            .ok_or_else(|| {
                Error::Unauthorized(format!("missing '{}' header", access.principal_header))
            })
    }
}
