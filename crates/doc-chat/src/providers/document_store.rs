//! Document store provider trait for extracted document text

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::Document;

/// Trait for document storage
///
/// `owner = None` means unscoped access (public mode): every document is visible.
/// `owner = Some(id)` restricts reads and deletes to that principal's documents, and
/// a document owned by someone else is reported as `NotFound`.
///
/// Implementations:
/// - `SqliteDocumentStore`: SQLite `documents` table
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document, returning it with its assigned id and timestamp
    async fn create_document(
        &self,
        title: &str,
        content: &str,
        owner: Option<&str>,
    ) -> Result<Document>;

    /// List documents in creation order
    async fn list_documents(&self, owner: Option<&str>) -> Result<Vec<Document>>;

    /// Fetch a single document
    async fn get_document(&self, id: &Uuid, owner: Option<&str>) -> Result<Document>;

    /// Delete a document
    async fn delete_document(&self, id: &Uuid, owner: Option<&str>) -> Result<()>;

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
