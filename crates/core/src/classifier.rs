use crate::error::{Result, RiskError};
use crate::models::ClassificationResult;
use providers::{ProviderRegistry, TextClassifier};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Front-end for an external text classifier: validates locally, bounds the call.
#[derive(Clone)]
pub struct RiskClassifier {
    provider: Arc<dyn TextClassifier>,
    timeout: Duration,
}

impl RiskClassifier {
    pub fn new(provider: Arc<dyn TextClassifier>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_registry(
        registry: &ProviderRegistry,
        name: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let provider = registry.classifier(name).map_err(RiskError::classification)?;
        Ok(Self::new(provider, timeout))
    }

    pub async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        if text.trim().is_empty() {
            return Err(RiskError::InputValidation(
                "text to classify is empty".to_string(),
            ));
        }

        let started = Instant::now();
        let resp = match tokio::time::timeout(self.timeout, self.provider.classify(text)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!(error = %e, "classifier call failed");
                return Err(RiskError::classification(e));
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "classifier call timed out");
                return Err(RiskError::ClassificationUnavailable(format!(
                    "no answer within {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if !(0.0..=1.0).contains(&resp.score) {
            return Err(RiskError::ClassificationUnavailable(format!(
                "service reported confidence {} outside [0, 1]",
                resp.score
            )));
        }

        info!(
            label = %resp.label,
            confidence = resp.score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "text classified"
        );
        Ok(ClassificationResult {
            label: resp.label,
            confidence: resp.score,
        })
    }
}
