//! Stored document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document whose extracted text has been stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded (not unique)
    pub title: String,
    /// Full extracted plain text
    pub content: String,
    /// Principal that uploaded the document (None in public mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document with a fresh id and the current timestamp
    pub fn new(title: impl Into<String>, content: impl Into<String>, owner: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            owner: owner.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    /// Number of characters of extracted text
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

/// Listing view of a document (no content)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub title: String,
    pub content_chars: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title.clone(),
            content_chars: doc.content_chars(),
            created_at: doc.created_at,
        }
    }
}
