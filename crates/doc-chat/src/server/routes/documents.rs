//! Document listing and removal endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{Document, DocumentListResponse};

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound(format!("document {}", raw)))
}

/// GET /api/documents - List the caller's documents
pub async fn list_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DocumentListResponse>> {
    let owner = state.principal(&headers)?;
    let docs = state.store().list_documents(owner.as_deref()).await?;
    Ok(Json(DocumentListResponse::from(docs.as_slice())))
}

/// GET /api/documents/:id - Get a document with its text
pub async fn get_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Document>> {
    let owner = state.principal(&headers)?;
    let id = parse_id(&id)?;
    let doc = state.store().get_document(&id, owner.as_deref()).await?;
    Ok(Json(doc))
}

/// DELETE /api/documents/:id - Delete a document
pub async fn delete_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let owner = state.principal(&headers)?;
    let id = parse_id(&id)?;
    state.store().delete_document(&id, owner.as_deref()).await?;

    tracing::info!("Deleted document {}", id);
    Ok(Json(serde_json::json!({ "success": true, "deleted": id })))
}
