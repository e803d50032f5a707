//! Format detection and per-format text extraction

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Extensions accepted regardless of configuration
const BASE_EXTENSIONS: &[&str] = &["txt", "pdf", "doc", "docx"];

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// UTF-8 text (`.txt`)
    Plain,
    /// PDF document
    Pdf,
    /// Word document (`.docx`, `.doc`)
    Word,
    /// Comma-separated values
    Csv,
}

impl SourceFormat {
    /// Detect format from the suffix after the last `.`, case-insensitively.
    ///
    /// Fails with `UnsupportedFormat` when there is no `.` or the suffix is not allowed.
    pub fn from_filename(filename: &str, allow_csv: bool) -> Result<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("'{}' has no file extension", filename))
            })?;

        let allowed = BASE_EXTENSIONS.contains(&extension.as_str())
            || (allow_csv && extension == "csv");
        if !allowed {
            return Err(Error::UnsupportedFormat(format!(
                "'.{}' is not one of {}",
                extension,
                allowed_extensions(allow_csv).join(", ")
            )));
        }

        Ok(match extension.as_str() {
            "txt" => Self::Plain,
            "pdf" => Self::Pdf,
            "csv" => Self::Csv,
            _ => Self::Word,
        })
    }

    /// Extract plain text from the file bytes
    pub fn extract(&self, filename: &str, data: &[u8]) -> Result<String> {
        match self {
            Self::Plain => extract_plain(filename, data),
            Self::Pdf => extract_pdf(filename, data),
            Self::Word => extract_word(filename, data),
            Self::Csv => extract_csv(filename, data),
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extensions accepted under the given configuration
pub fn allowed_extensions(allow_csv: bool) -> Vec<&'static str> {
    let mut exts = BASE_EXTENSIONS.to_vec();
    if allow_csv {
        exts.push("csv");
    }
    exts
}

fn decode_utf8(filename: &str, data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|e| Error::decode(filename, e.to_string()))
}

fn extract_plain(filename: &str, data: &[u8]) -> Result<String> {
    decode_utf8(filename, data)
}

/// Per-page text in page order. Pages without text come back as empty strings.
pub(crate) fn pdf_pages(filename: &str, data: &[u8]) -> Result<Vec<String>> {
    pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| Error::extraction(filename, e.to_string()))
}

fn extract_pdf(filename: &str, data: &[u8]) -> Result<String> {
    let pages = pdf_pages(filename, data)?;
    tracing::debug!("Extracted {} PDF pages from {}", pages.len(), filename);
    Ok(pages.concat())
}

fn extract_word(filename: &str, data: &[u8]) -> Result<String> {
    let doc = docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

    let paragraphs: Vec<String> = doc
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => {
                let mut text = String::new();
                push_paragraph_text(&p.children, &mut text);
                Some(text)
            }
            _ => None,
        })
        .collect();

    Ok(paragraphs.join(" "))
}

/// Visible paragraph text, including hyperlinks and tracked insertions
fn push_paragraph_text(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, out),
            docx_rs::ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, out),
            docx_rs::ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        push_run_text(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            docx_rs::RunChild::Break(_) | docx_rs::RunChild::CarriageReturn(_) => out.push('\n'),
            _ => {}
        }
    }
}

fn extract_csv(filename: &str, data: &[u8]) -> Result<String> {
    let text = decode_utf8(filename, data)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::extraction(filename, e.to_string()))?;
        rows.push(record.iter().collect::<Vec<_>>().join(", "));
    }

    Ok(rows.join("\n"))
}
