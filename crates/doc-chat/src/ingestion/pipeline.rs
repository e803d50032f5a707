//! Upload ingestion: validate, extract through a scoped temp file, then store

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::IngestionConfig;
use crate::error::{Error, Result};
use crate::providers::DocumentStore;
use crate::types::Document;

use super::parser::SourceFormat;

/// Text extracted from one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub source_format: SourceFormat,
}

/// A stored upload
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub document: Document,
    pub source_format: SourceFormat,
}

/// File-to-text ingestion pipeline
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    upload_dir: PathBuf,
    allow_csv: bool,
}

impl IngestPipeline {
    /// Create a pipeline from configuration
    pub fn new(config: &IngestionConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            allow_csv: config.allow_csv,
        }
    }

    /// Directory holding in-flight temp copies
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Validate the extension and extract text.
    ///
    /// The bytes are staged in a temp file inside `upload_dir`; the file is removed
    /// when this returns, whichever way it returns.
    pub fn extract(&self, filename: &str, data: &[u8]) -> Result<ExtractionResult> {
        let source_format = SourceFormat::from_filename(filename, self.allow_csv)?;

        let staged = self.stage(data)?;
        let staged_bytes = std::fs::read(staged.path())?;
        let text = source_format.extract(filename, &staged_bytes)?;

        Ok(ExtractionResult {
            text,
            source_format,
        })
    }

    /// Copy the upload into a temp file that is removed when dropped
    fn stage(&self, data: &[u8]) -> Result<tempfile::NamedTempFile> {
        std::fs::create_dir_all(&self.upload_dir)?;
        let mut staged = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(&self.upload_dir)?;
        staged.write_all(data)?;
        staged.flush()?;
        Ok(staged)
    }

    /// Run an extraction job on the blocking pool. A panicking extractor is
    /// reported as `ExtractionFailed` for `filename`.
    async fn run_blocking<F>(filename: &str, job: F) -> Result<ExtractionResult>
    where
        F: FnOnce() -> Result<ExtractionResult> + Send + 'static,
    {
        tokio::task::spawn_blocking(job).await.map_err(|e| {
            if e.is_panic() {
                Error::extraction(filename, "extractor aborted on malformed input")
            } else {
                Error::Internal(format!("Task join error: {}", e))
            }
        })?
    }

    /// Extract and, only if extraction succeeded, persist the document
    pub async fn ingest(
        &self,
        store: &dyn DocumentStore,
        owner: Option<&str>,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<IngestOutcome> {
        let start = Instant::now();
        let size = data.len();
        tracing::info!("Processing upload: {} ({} bytes)", filename, size);

        let pipeline = self.clone();
        let name = filename.to_string();
        let extracted = Self::run_blocking(filename, move || pipeline.extract(&name, &data)).await;

        let extracted = match extracted {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Rejected upload {}: {}", filename, e);
                return Err(e);
            }
        };

        let document = store
            .create_document(filename, &extracted.text, owner)
            .await?;

        tracing::info!(
            "Stored {} as {} ({} format, {} chars) in {:.1}s",
            filename,
            document.id,
            extracted.source_format,
            document.content_chars(),
            start.elapsed().as_secs_f64()
        );

        Ok(IngestOutcome {
            document,
            source_format: extracted.source_format,
        })
    }
}
