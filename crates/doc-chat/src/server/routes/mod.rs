//! API routes for the document chat server

pub mod chat;
pub mod documents;
pub mod upload;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::ingestion::allowed_extensions;
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Document management
        .route("/documents", get(documents::list_documents))
        .route(
            "/documents/:id",
            get(documents::get_document).delete(documents::delete_document),
        )
        // Upload - body limit applies to this route only
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Chat
        .route("/chat", post(chat::chat))
        .route("/chat/direct", post(chat::direct_chat))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.config();
    Json(serde_json::json!({
        "name": "doc-chat",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Upload documents and ask questions answered from their text",
        "completion": {
            "backend": state.completion().name(),
            "model": state.completion().model(),
        },
        "storage": state.store().name(),
        "allowed_extensions": allowed_extensions(config.ingestion.allow_csv),
        "max_upload_size": config.server.max_upload_size,
        "access_mode": config.access.mode,
        "endpoints": {
            "POST /api/upload": "Upload a document (multipart field 'file')",
            "GET /api/documents": "List documents",
            "GET /api/documents/:id": "Get a document with its text",
            "DELETE /api/documents/:id": "Delete a document",
            "POST /api/chat": "Ask a question about the uploaded documents",
            "POST /api/chat/direct": "Chat without document context"
        }
    }))
}
