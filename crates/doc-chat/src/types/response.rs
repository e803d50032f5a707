//! Response types

use serde::{Deserialize, Serialize};

use super::document::{Document, DocumentSummary};

/// Answer to a document question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Completion text, unmodified
    pub answer: String,
    /// Number of documents included in the prompt
    pub documents_used: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Reply to a direct chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectChatResponse {
    pub response: String,
}

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub document: DocumentSummary,
    /// Which extractor produced the text
    pub source_format: String,
    pub processing_time_ms: u64,
}

/// Document listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub total: usize,
}

impl From<&[Document]> for DocumentListResponse {
    fn from(docs: &[Document]) -> Self {
        let documents: Vec<DocumentSummary> = docs.iter().map(DocumentSummary::from).collect();
        Self {
            total: documents.len(),
            documents,
        }
    }
}
