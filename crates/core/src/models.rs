use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
}

impl DocumentFormat {
    /// Resolves a declared format tag (`"pdf"`, `"PDF"`, `"application/pdf"`).
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.trim().to_lowercase().as_str() {
            "pdf" | ".pdf" | "application/pdf" => Ok(DocumentFormat::Pdf),
            other => Err(RiskError::UnsupportedFormat(format!(
                "{other:?} (only PDF documents are supported)"
            ))),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// An uploaded document together with the text extracted from it.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Vec<u8>,
    format: DocumentFormat,
    pages: Vec<String>,
    text: String,
    fingerprint: String,
}

impl Document {
    pub(crate) fn new(bytes: Vec<u8>, format: DocumentFormat, pages: Vec<String>) -> Self {
        let text = concat_pages(&pages);
        let fingerprint = blake3::hash(&bytes).to_hex().to_string();
        Self {
            bytes,
            format,
            pages,
            text,
            fingerprint,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// BLAKE3 digest of the raw bytes, hex encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Joins page texts in order, inserting a newline only where two pages
/// would otherwise run together.
pub(crate) fn concat_pages(pages: &[String]) -> String {
    let capacity = pages.iter().map(String::len).sum::<usize>() + pages.len();
    let mut text = String::with_capacity(capacity);
    for page in pages {
        let needs_break = !text.is_empty()
            && !text.ends_with(char::is_whitespace)
            && !page.starts_with(char::is_whitespace);
        if needs_break {
            text.push('\n');
        }
        text.push_str(page);
    }
    text
}

/// Recommended actions shown with every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionList(Vec<String>);

impl ActionList {
    pub fn new(actions: Vec<String>) -> Self {
        Self(actions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_are_case_insensitive() {
        assert_eq!(DocumentFormat::from_tag("PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(
            DocumentFormat::from_tag("application/pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert!(matches!(
            DocumentFormat::from_tag("docx"),
            Err(RiskError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn pages_concatenate_in_order() {
        let pages = vec![
            "delay delay shipment".to_string(),
            "vendor vendor vendor".to_string(),
        ];
        assert_eq!(
            concat_pages(&pages),
            "delay delay shipment\nvendor vendor vendor"
        );

        let pages = vec!["first page\n".to_string(), "second page".to_string()];
        assert_eq!(concat_pages(&pages), "first page\nsecond page");
    }

    #[test]
    fn fingerprint_is_stable() {
        let a = Document::new(b"%PDF-1.4".to_vec(), DocumentFormat::Pdf, vec!["x".into()]);
        let b = Document::new(b"%PDF-1.4".to_vec(), DocumentFormat::Pdf, vec!["x".into()]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
