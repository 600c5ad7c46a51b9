use crate::{ClassifyResponse, MailRelay, OutgoingMail, ProviderError, TextClassifier};

#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl TextClassifier for NoopProvider {
    async fn classify(&self, _text: &str) -> Result<ClassifyResponse, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}

#[async_trait::async_trait]
impl MailRelay for NoopProvider {
    async fn deliver(&self, _mail: &OutgoingMail) -> Result<(), ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}
