//! Document ingestion: bytes in, page-ordered plain text out.

use crate::error::{Result, RiskError};
use crate::models::{Document, DocumentFormat};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub trait TextExtractor: Send + Sync {
    /// Text of every page, in document order.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// Extracts the embedded text layer of digital PDFs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[cfg(feature = "pdf")]
impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs.
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));
        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(RiskError::Extraction(e.to_string())),
            Err(_) => Err(RiskError::Extraction(
                "PDF parser aborted on malformed content".to_string(),
            )),
        }
    }
}

#[cfg(not(feature = "pdf"))]
impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
        Err(RiskError::Extraction(
            "built without the `pdf` feature".to_string(),
        ))
    }
}

#[derive(Clone)]
pub struct DocumentIngestor {
    extractor: Arc<dyn TextExtractor>,
    timeout: Duration,
}

impl DocumentIngestor {
    pub fn new(extractor: Arc<dyn TextExtractor>, timeout: Duration) -> Self {
        Self { extractor, timeout }
    }

    pub fn pdf(timeout: Duration) -> Self {
        Self::new(Arc::new(PdfTextExtractor), timeout)
    }

    /// Validates the declared format against the content and extracts its text.
    pub fn ingest(&self, bytes: Vec<u8>, declared: &str) -> Result<Document> {
        let format = DocumentFormat::from_tag(declared)?;
        check_content(&bytes, format)?;

        let pages = self.extractor.extract_pages(&bytes)?;
        if pages.iter().all(|p| p.trim().is_empty()) {
            return Err(RiskError::Extraction(format!(
                "no extractable text found in {} page(s); the document may be scanned",
                pages.len()
            )));
        }

        let doc = Document::new(bytes, format, pages);
        info!(
            fingerprint = %doc.fingerprint(),
            pages = doc.page_count(),
            chars = doc.text().len(),
            "document ingested"
        );
        Ok(doc)
    }

    /// Runs [`ingest`](Self::ingest) on the blocking pool, bounded by the configured timeout.
    pub async fn ingest_with_timeout(&self, bytes: Vec<u8>, declared: &str) -> Result<Document> {
        let this = self.clone();
        let declared = declared.to_string();
        let task = tokio::task::spawn_blocking(move || this.ingest(bytes, &declared));
        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(RiskError::Extraction(format!(
                "extraction task failed: {join}"
            ))),
            Err(_) => Err(RiskError::Extraction(format!(
                "timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

fn check_content(bytes: &[u8], format: DocumentFormat) -> Result<()> {
    if bytes.is_empty() {
        return Err(RiskError::Extraction("document is empty".to_string()));
    }
    let detected = infer::get(bytes).map(|kind| kind.mime_type());
    debug!(?detected, declared = %format, "sniffed document content");
    match detected {
        Some(mime) if mime == format.mime_type() => Ok(()),
        Some(mime) => Err(RiskError::UnsupportedFormat(format!(
            "declared {format} but content is {mime}"
        ))),
        None => Err(RiskError::UnsupportedFormat(format!(
            "declared {format} but content is not recognized"
        ))),
    }
}

/// Derives a format tag from a file name, falling back to content sniffing.
pub fn format_tag_for(path: &Path, bytes: &[u8]) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .or_else(|| infer::get(bytes).map(|kind| kind.extension().to_string()))
        .unwrap_or_default()
}
