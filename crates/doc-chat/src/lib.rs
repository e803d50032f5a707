//! doc-chat: upload documents, then ask questions answered from their text
//!
//! Uploaded files (plain text, PDF, Word, optionally CSV) are reduced to plain text and
//! stored in SQLite. A chat request places every visible document, titled and in
//! creation order, into a single prompt for a hosted completion model.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use generation::{ChatPipeline, PromptBuilder};
pub use ingestion::{IngestPipeline, SourceFormat};
pub use server::{state::AppState, DocServer};
pub use types::{Document, DocumentSummary};
