//! SQLite document store provider
//!
//! Wraps the synchronous `DocumentDb` and runs each call on the blocking pool.

use async_trait::async_trait;
use std::path::Path;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::storage::DocumentDb;
use crate::types::Document;

use super::document_store::DocumentStore;

/// Document store backed by the SQLite `documents` table
#[derive(Clone)]
pub struct SqliteDocumentStore {
    db: DocumentDb,
}

impl SqliteDocumentStore {
    /// Create from an existing database handle
    pub fn new(db: DocumentDb) -> Self {
        Self { db }
    }

    /// Open (or create) the database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DocumentDb::new(path)?))
    }

    /// In-memory store
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(DocumentDb::in_memory()?))
    }

    /// Get underlying database for direct access
    pub fn inner(&self) -> &DocumentDb {
        &self.db
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(DocumentDb) -> Result<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || op(db))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create_document(
        &self,
        title: &str,
        content: &str,
        owner: Option<&str>,
    ) -> Result<Document> {
        let doc = Document::new(title, content, owner);
        self.blocking(move |db| {
            db.insert_document(&doc)?;
            Ok(doc)
        })
        .await
    }

    async fn list_documents(&self, owner: Option<&str>) -> Result<Vec<Document>> {
        let owner = owner.map(str::to_string);
        self.blocking(move |db| db.list_documents(owner.as_deref()))
            .await
    }

    async fn get_document(&self, id: &Uuid, owner: Option<&str>) -> Result<Document> {
        let id = *id;
        let owner = owner.map(str::to_string);
        self.blocking(move |db| {
            db.get_document(&id, owner.as_deref())?
                .ok_or_else(|| Error::NotFound(id.to_string()))
        })
        .await
    }

    async fn delete_document(&self, id: &Uuid, owner: Option<&str>) -> Result<()> {
        let id = *id;
        let owner = owner.map(str::to_string);
        self.blocking(move |db| {
            if db.delete_document(&id, owner.as_deref())? {
                Ok(())
            } else {
                Err(Error::NotFound(id.to_string()))
            }
        })
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.blocking(|db| db.count_documents(None)).await.is_ok())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_round_trip_is_byte_identical() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        let original = "Zeile 1: Grüße\r\nline two\ttabbed\n\n  trailing spaces  \u{1F600}";

        let created = store.create_document("greeting.txt", original, None).await.unwrap();
        let fetched = store.get_document(&created.id, None).await.unwrap();

        assert_eq!(fetched.content.as_bytes(), original.as_bytes());
        assert_eq!(fetched.title, "greeting.txt");
    }

    #[tokio::test]
    async fn test_not_found_for_wrong_owner() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        let doc = store.create_document("a.txt", "alpha", Some("alice")).await.unwrap();

        let err = store.get_document(&doc.id, Some("mallory")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = store.delete_document(&doc.id, Some("mallory")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        store.delete_document(&doc.id, Some("alice")).await.unwrap();
        assert!(store.list_documents(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        assert!(store.health_check().await.unwrap());
        assert_eq!(store.name(), "sqlite");
    }
}
