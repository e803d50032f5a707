//! Error types for the document chat service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for doc-chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Document chat errors
#[derive(Debug, Error)]
pub enum Error {
    /// File extension missing or not in the allow-list
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Bytes are not valid UTF-8 where text was expected
    #[error("Failed to decode '{filename}' as UTF-8: {message}")]
    Decode { filename: String, message: String },

    /// Format-specific parser rejected the file
    #[error("Failed to extract text from '{filename}': {message}")]
    ExtractionFailed { filename: String, message: String },

    /// Malformed or incomplete request (e.g. empty question)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Chat requested but the principal has no documents
    #[error("No documents have been uploaded yet")]
    NoDocuments,

    /// Unknown document id, or a document owned by someone else
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Completion service failed (timeout, bad status, malformed body)
    #[error("Completion service error: {0}")]
    UpstreamFailure(String),

    /// Scoped access without a principal
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a decode error
    pub fn decode(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamFailure(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-readable error kind used in HTTP responses
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Decode { .. } => "decode_error",
            Error::ExtractionFailed { .. } => "extraction_failed",
            Error::InvalidRequest(_) => "invalid_request",
            Error::NoDocuments => "no_documents",
            Error::NotFound(_) => "not_found",
            Error::UpstreamFailure(_) => "upstream_failure",
            Error::Unauthorized(_) => "unauthorized",
            Error::Config(_) => "config_error",
            Error::Storage(_) => "storage_error",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Error::UnsupportedFormat(_)
            | Error::Decode { .. }
            | Error::InvalidRequest(_)
            | Error::Config(_) => StatusCode::BAD_REQUEST,
            Error::ExtractionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NoDocuments => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Storage(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
