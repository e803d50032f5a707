//! Shared fixtures for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::{CompletionProvider, DocumentStore};
use crate::types::Document;

/// Serve `router` on an ephemeral local port and return its base URL
pub(crate) async fn spawn_mock_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Hand-built PDF with one page per entry; `None` gives a page with an empty
/// content stream. Offsets in the xref table are exact so pdf-extract accepts it.
pub(crate) fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then (page, contents) pairs from 4
    let page_id = |i: usize| 4 + 2 * i;
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec(),
    ];

    for (i, text) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R \
                 /Resources << /Font << /F1 3 0 R >> >> >>",
                page_id(i) + 1
            )
            .into_bytes(),
        );

        let content = match text {
            Some(t) => format!("BT /F1 12 Tf 72 700 Td ({}) Tj ET", t),
            None => String::new(),
        };
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj ", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b" endobj\n");
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!("trailer << /Size {} /Root 1 0 R >>\nstartxref\n", objects.len() + 1).as_bytes(),
    );
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

/// A `.docx` with one single-run paragraph per entry
pub(crate) fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
        );
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

/// In-memory `DocumentStore` that counts calls
#[derive(Default)]
pub(crate) struct RecordingStore {
    docs: Mutex<Vec<Document>>,
    creates: AtomicUsize,
    lists: AtomicUsize,
}

impl RecordingStore {
    /// Insert a document without counting it as a create call
    pub fn seed(&self, title: &str, content: &str, owner: Option<&str>) -> Document {
        let doc = Document::new(title, content, owner);
        self.docs.lock().push(doc.clone());
        doc
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    fn visible(doc: &Document, owner: Option<&str>) -> bool {
        owner.is_none() || doc.owner.as_deref() == owner
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn create_document(
        &self,
        title: &str,
        content: &str,
        owner: Option<&str>,
    ) -> Result<Document> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let doc = Document::new(title, content, owner);
        self.docs.lock().push(doc.clone());
        Ok(doc)
    }

    async fn list_documents(&self, owner: Option<&str>) -> Result<Vec<Document>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .docs
            .lock()
            .iter()
            .filter(|d| Self::visible(d, owner))
            .cloned()
            .collect())
    }

    async fn get_document(&self, id: &Uuid, owner: Option<&str>) -> Result<Document> {
        self.docs
            .lock()
            .iter()
            .find(|d| d.id == *id && Self::visible(d, owner))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("document {}", id)))
    }

    async fn delete_document(&self, id: &Uuid, owner: Option<&str>) -> Result<()> {
        let mut docs = self.docs.lock();
        let before = docs.len();
        docs.retain(|d| !(d.id == *id && Self::visible(d, owner)));
        if docs.len() == before {
            return Err(Error::NotFound(format!("document {}", id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// `CompletionProvider` that replies with a fixed answer and records requests
pub(crate) struct RecordingCompletion {
    answer: String,
    next_error: Mutex<Option<Error>>,
    requests: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl RecordingCompletion {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            next_error: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Make the next `complete` call fail with `err`
    pub fn fail_next(&self, err: Error) {
        *self.next_error.lock() = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most recent `(system, prompt)` pair
    pub fn last_request(&self) -> Option<(String, String)> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for RecordingCompletion {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .push((system.to_string(), prompt.to_string()));

        if let Some(err) = self.next_error.lock().take() {
            return Err(err);
        }
        Ok(self.answer.clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "recording-model"
    }
}
