//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{DocumentSummary, UploadResponse};

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// POST /api/upload - Extract and store one file
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();
    let owner = state.principal(&headers)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::InvalidRequest("No file selected".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidRequest(format!("Failed to read file: {}", e)))?;

        let outcome = state
            .ingest()
            .ingest(state.store().as_ref(), owner.as_deref(), &filename, data.to_vec())
            .await?;

        return Ok(Json(UploadResponse {
            success: true,
            document: DocumentSummary::from(&outcome.document),
            source_format: outcome.source_format.to_string(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }));
    }

    Err(Error::InvalidRequest(format!(
        "multipart field '{}' is required",
        FILE_FIELD
    )))
}
