use crate::keywords::{KeywordSummarizer, KeywordView};
use crate::models::{ActionList, Document};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SUMMARY_FILE_NAME: &str = "risk_summary.txt";

/// Extracted text, its keyword view and the recommended actions, assembled once.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    text: String,
    keywords: KeywordView,
    actions: ActionList,
}

/// A downloadable artifact: file name plus raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

impl Export {
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

impl RiskReport {
    pub fn assemble(text: impl Into<String>, keywords: KeywordView, actions: ActionList) -> Self {
        Self {
            text: text.into(),
            keywords,
            actions,
        }
    }

    pub fn from_document(
        doc: &Document,
        summarizer: &KeywordSummarizer,
        actions: &ActionList,
    ) -> Self {
        let keywords = summarizer.summarize(doc.text());
        Self::assemble(doc.text(), keywords, actions.clone())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keywords(&self) -> &KeywordView {
        &self.keywords
    }

    pub fn actions(&self) -> &ActionList {
        &self.actions
    }

    /// The raw extracted text as `risk_summary.txt`.
    pub fn export(&self) -> Export {
        Export {
            file_name: SUMMARY_FILE_NAME,
            bytes: self.text.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordConfig;

    fn actions() -> ActionList {
        ActionList::new(vec![
            "Initiate supplier audit for financial health.".into(),
            "Increase safety stock for vulnerable items.".into(),
        ])
    }

    #[test]
    fn export_round_trips_text_exactly() {
        let text = "Körber — late shipment\n\tline two\r\n";
        let summarizer = KeywordSummarizer::new(KeywordConfig::default());
        let report = RiskReport::assemble(text, summarizer.summarize(text), actions());
        let export = report.export();
        assert_eq!(export.file_name, "risk_summary.txt");
        assert_eq!(String::from_utf8(export.bytes).unwrap(), text);
    }

    #[test]
    fn empty_text_still_builds_a_report() {
        let summarizer = KeywordSummarizer::new(KeywordConfig::default());
        let report = RiskReport::assemble("", summarizer.summarize(""), actions());
        assert!(report.keywords().is_empty());
        assert_eq!(report.actions().len(), 2);
        assert!(report.export().bytes.is_empty());
    }

    #[test]
    fn export_is_written_under_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let report = RiskReport::assemble("vendor", KeywordView::default(), actions());
        let path = report.export().write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("risk_summary.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "vendor");
    }
}
