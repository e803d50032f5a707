//! Document ingestion pipeline with multi-format parsing

mod parser;
mod pipeline;

pub use parser::{allowed_extensions, SourceFormat};
pub use pipeline::{ExtractionResult, IngestOutcome, IngestPipeline};
