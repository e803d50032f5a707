//! Chat endpoints

use axum::{extract::State, http::HeaderMap, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, DirectChatRequest, DirectChatResponse};

/// POST /api/chat - Answer a question from the caller's documents
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let start = Instant::now();
    let owner = state.principal(&headers)?;

    let answer = state
        .chat()
        .answer(owner.as_deref(), request.question.as_deref())
        .await?;

    tracing::info!(
        "Answered question from {} documents in {}ms",
        answer.documents_used,
        start.elapsed().as_millis()
    );

    Ok(Json(ChatResponse {
        answer: answer.answer,
        documents_used: answer.documents_used,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// POST /api/chat/direct - Send a message without document context
pub async fn direct_chat(
    State(state): State<AppState>,
    Json(request): Json<DirectChatRequest>,
) -> Result<Json<DirectChatResponse>> {
    let response = state.chat().direct(request.message.as_deref()).await?;
    Ok(Json(DirectChatResponse { response }))
}
