#![allow(dead_code)]

use lopdf::{dictionary, Document, Object, Stream};
use providers::{ClassifyResponse, ProviderError, ProviderRegistry, TextClassifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use supplier_risk_core::config;
use supplier_risk_core::notifier::AlertNotifier;
use supplier_risk_core::pipeline::Services;

/// Builds a PDF with one Helvetica text line per page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[derive(Default)]
pub struct FakeClassifier {
    pub calls: AtomicUsize,
    pub unavailable: bool,
}

impl FakeClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextClassifier for FakeClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassifyResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(ProviderError::RequestFailed("503 Service Unavailable".into()));
        }
        Ok(ClassifyResponse {
            label: "NEGATIVE".into(),
            score: 0.9931,
        })
    }
}

/// Services over the built-in defaults with a fake classifier and simulated alerts.
pub fn services_with(classifier: Arc<FakeClassifier>) -> Services {
    let cfg = config::defaults().unwrap();
    let registry = ProviderRegistry::new()
        .with_classifier("fake", classifier)
        .set_preferred_classifier("fake");
    Services::with_parts(cfg, registry, AlertNotifier::simulated())
}
