//! Core types for the document chat service

pub mod document;
pub mod query;
pub mod response;

pub use document::{Document, DocumentSummary};
pub use query::{ChatRequest, DirectChatRequest};
pub use response::{ChatResponse, DirectChatResponse, DocumentListResponse, UploadResponse};
