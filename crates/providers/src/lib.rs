//! Provider abstractions for text classification and mail delivery.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod huggingface;
pub mod noop;
pub mod smtp;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not implemented")]
    NotImplemented,
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("misconfigured provider: {0}")]
    Misconfigured(String),
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub label: String,
    pub score: f32,
}

/// A single plain-text message handed to a mail relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait::async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifyResponse, ProviderError>;
}

#[async_trait::async_trait]
pub trait MailRelay: Send + Sync {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), ProviderError>;
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    classifiers: HashMap<String, Arc<dyn TextClassifier>>,
    relays: HashMap<String, Arc<dyn MailRelay>>,
    pub preferred_classifier: Option<String>,
    pub preferred_relay: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(mut self, name: &str, provider: Arc<dyn TextClassifier>) -> Self {
        self.classifiers.insert(name.to_string(), provider);
        self
    }

    pub fn with_relay(mut self, name: &str, relay: Arc<dyn MailRelay>) -> Self {
        self.relays.insert(name.to_string(), relay);
        self
    }

    pub fn set_preferred_classifier(mut self, name: &str) -> Self {
        self.preferred_classifier = Some(name.to_string());
        self
    }

    pub fn set_preferred_relay(mut self, name: &str) -> Self {
        self.preferred_relay = Some(name.to_string());
        self
    }

    pub fn classifier(
        &self,
        name: Option<&str>,
    ) -> Result<Arc<dyn TextClassifier>, ProviderError> {
        let key = name
            .map(str::to_string)
            .or_else(|| self.preferred_classifier.clone())
            .ok_or_else(|| ProviderError::UnknownProvider("no classifier configured".into()))?;
        self.classifiers
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(key))
    }

    pub fn relay(&self, name: Option<&str>) -> Result<Arc<dyn MailRelay>, ProviderError> {
        let key = name
            .map(str::to_string)
            .or_else(|| self.preferred_relay.clone())
            .ok_or_else(|| ProviderError::UnknownProvider("no mail relay configured".into()))?;
        self.relays
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(key))
    }
}
