//! SQLite database for extracted document text
//!
//! One `documents` table; rows are created and deleted, never updated.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::Document;

/// SQLite-based document table
#[derive(Clone)]
pub struct DocumentDb {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentDb {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::storage(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate(true)?;
        Ok(db)
    }

    /// Create an in-memory database (for tests and throwaway runs)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate(false)?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self, on_disk: bool) -> Result<()> {
        let conn = self.conn.lock();

        if on_disk {
            conn.execute_batch(
                r#"
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
            "#,
            )
            .map_err(|e| Error::storage(format!("Failed to set pragmas: {}", e)))?;
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                owner TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(owner);
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to run migrations: {}", e)))?;

        tracing::debug!("Database migrations complete");
        Ok(())
    }

    /// Insert a document row
    pub fn insert_document(&self, doc: &Document) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO documents (id, title, content, owner, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                doc.id.to_string(),
                doc.title,
                doc.content,
                doc.owner,
                doc.created_at,
            ],
        )
        .map_err(|e| Error::storage(format!("Failed to insert document: {}", e)))?;

        Ok(())
    }

    /// List documents in insertion order; `None` lists every row
    pub fn list_documents(&self, owner: Option<&str>) -> Result<Vec<Document>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(
                "SELECT id, title, content, owner, created_at FROM documents \
                 WHERE (?1 IS NULL OR owner = ?1) ORDER BY rowid ASC",
            )
            .map_err(|e| Error::storage(format!("Failed to prepare query: {}", e)))?;

        let docs = stmt
            .query_map(params![owner], row_to_document)
            .map_err(|e| Error::storage(format!("Failed to list documents: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::storage(format!("Failed to read document row: {}", e)))?;

        Ok(docs)
    }

    /// Get a document by id, optionally restricted to an owner
    pub fn get_document(&self, id: &Uuid, owner: Option<&str>) -> Result<Option<Document>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(
                "SELECT id, title, content, owner, created_at FROM documents \
                 WHERE id = ?1 AND (?2 IS NULL OR owner = ?2)",
            )
            .map_err(|e| Error::storage(format!("Failed to prepare query: {}", e)))?;

        let doc = stmt
            .query_row(params![id.to_string(), owner], row_to_document)
            .optional()
            .map_err(|e| Error::storage(format!("Failed to get document: {}", e)))?;

        Ok(doc)
    }

    /// Delete a document, returning whether a row was removed
    pub fn delete_document(&self, id: &Uuid, owner: Option<&str>) -> Result<bool> {
        let conn = self.conn.lock();

        let count = conn
            .execute(
                "DELETE FROM documents WHERE id = ?1 AND (?2 IS NULL OR owner = ?2)",
                params![id.to_string(), owner],
            )
            .map_err(|e| Error::storage(format!("Failed to delete document: {}", e)))?;

        Ok(count > 0)
    }

    /// Count documents; `None` counts every row
    pub fn count_documents(&self, owner: Option<&str>) -> Result<usize> {
        let conn = self.conn.lock();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE (?1 IS NULL OR owner = ?1)",
                params![owner],
                |row| row.get(0),
            )
            .map_err(|e| Error::storage(format!("Failed to count documents: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_document(row: &rusqlite::Row) -> rusqlite::Result<Document> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Document {
        id,
        title: row.get(1)?,
        content: row.get(2)?,
        owner: row.get(3)?,
        created_at: row.get(4)?,
    })
}
