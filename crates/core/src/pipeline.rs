use crate::classifier::RiskClassifier;
use crate::config::{AlertMode, AppConfig};
use crate::dashboard;
use crate::error::Result;
use crate::extractor::DocumentIngestor;
use crate::keywords::KeywordSummarizer;
use crate::models::{ActionList, Document};
use crate::notifier::AlertNotifier;
use crate::report::RiskReport;
use anyhow::Context;
use providers::huggingface::{InferenceClassifier, InferenceConfig};
use providers::noop::NoopProvider;
use providers::smtp::{SmtpConfig, SmtpRelay};
use providers::ProviderRegistry;
use std::sync::Arc;
use tracing::{info, warn};

pub const SMTP_RELAY: &str = "smtp";

/// Everything one interaction needs, built once from configuration.
pub struct Services {
    pub ingestor: DocumentIngestor,
    pub summarizer: KeywordSummarizer,
    pub actions: ActionList,
    pub registry: ProviderRegistry,
    pub notifier: AlertNotifier,
    config: AppConfig,
}

impl Services {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let registry = build_registry(&config)?;
        let notifier = build_notifier(&config, &registry)?;
        Ok(Self::with_parts(config, registry, notifier))
    }

    /// Wires explicit providers, bypassing environment lookups.
    pub fn with_parts(
        config: AppConfig,
        registry: ProviderRegistry,
        notifier: AlertNotifier,
    ) -> Self {
        Self {
            ingestor: DocumentIngestor::pdf(config.extraction.timeout()),
            summarizer: KeywordSummarizer::new(config.keywords.clone()),
            actions: dashboard::action_list(&config),
            registry,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn classifier(&self) -> Result<RiskClassifier> {
        RiskClassifier::from_registry(&self.registry, None, self.config.classifier.timeout())
    }

    /// Upload -> extraction -> keyword view -> report.
    pub async fn analyze_document(
        &self,
        bytes: Vec<u8>,
        format_tag: &str,
    ) -> Result<(Document, RiskReport)> {
        let doc = self.ingestor.ingest_with_timeout(bytes, format_tag).await?;
        let report = RiskReport::from_document(&doc, &self.summarizer, &self.actions);
        info!(
            fingerprint = %doc.fingerprint(),
            keywords = report.keywords().len(),
            "risk report assembled"
        );
        Ok((doc, report))
    }
}

pub fn build_registry(config: &AppConfig) -> anyhow::Result<ProviderRegistry> {
    let mut reg = ProviderRegistry::new().with_classifier("noop", Arc::new(NoopProvider));

    if config.classifier.provider == "inference" {
        let api_token = config
            .classifier
            .token_env
            .as_deref()
            .and_then(std::env::var_os)
            .map(|v| v.to_string_lossy().into_owned());
        let provider = InferenceClassifier::new(InferenceConfig {
            base_url: config.classifier.base_url.clone(),
            model: config.classifier.model.clone(),
            api_token,
        });
        reg = reg.with_classifier("inference", Arc::new(provider));
    }

    // Relay credentials are only read in live mode.
    let live_smtp = match config.alerts.mode {
        AlertMode::Live => config.alerts.smtp.as_ref(),
        AlertMode::Simulated => None,
    };
    if let Some(smtp) = live_smtp {
        let password = std::env::var(&smtp.password_env)
            .with_context(|| format!("smtp password env var {} is not set", smtp.password_env))?;
        let relay = SmtpRelay::new(SmtpConfig {
            host: smtp.host.clone(),
            port: smtp.port,
            tls: smtp.tls,
            sender: smtp.sender.clone(),
            username: smtp.username.clone(),
            password,
            timeout: config.alerts.timeout(),
        })
        .context("smtp relay")?;
        reg = reg
            .with_relay(SMTP_RELAY, Arc::new(relay))
            .set_preferred_relay(SMTP_RELAY);
    }

    Ok(reg.set_preferred_classifier(&config.classifier.provider))
}

pub fn build_notifier(
    config: &AppConfig,
    registry: &ProviderRegistry,
) -> anyhow::Result<AlertNotifier> {
    match config.alerts.mode {
        AlertMode::Simulated => Ok(AlertNotifier::simulated()),
        AlertMode::Live => match registry.relay(None) {
            Ok(relay) => Ok(AlertNotifier::live(relay, config.alerts.timeout())),
            Err(e) => {
                warn!(error = %e, "live alerts requested without a relay");
                anyhow::bail!("alerts.mode is \"live\" but no [alerts.smtp] relay is configured")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::error::RiskError;

    #[test]
    fn default_config_builds_simulated_services() {
        let services = Services::from_config(config::defaults().unwrap()).unwrap();
        assert_eq!(services.notifier.mode(), AlertMode::Simulated);
        assert_eq!(services.actions.len(), 5);
        assert!(services.classifier().is_ok());
    }

    #[test]
    fn live_mode_without_relay_is_a_config_error() {
        let mut cfg = config::defaults().unwrap();
        cfg.alerts.mode = AlertMode::Live;
        assert!(Services::from_config(cfg).is_err());
    }

    #[test]
    fn simulated_mode_ignores_smtp_table_without_password() {
        let mut cfg = config::defaults().unwrap();
        cfg.alerts.smtp = Some(config::SmtpSettings {
            host: "smtp.example.com".into(),
            port: 465,
            tls: config::TlsMode::Implicit,
            sender: "alerts@example.com".into(),
            username: "alerts".into(),
            password_env: "SUPPLIER_RISK_TEST_UNSET_SMTP_PASSWORD".into(),
        });
        let services = Services::from_config(cfg).unwrap();
        assert_eq!(services.notifier.mode(), AlertMode::Simulated);
        assert!(services.registry.relay(None).is_err());
    }

    #[test]
    fn unknown_classifier_provider_is_unavailable() {
        let mut cfg = config::defaults().unwrap();
        cfg.classifier.provider = "does-not-exist".into();
        let services = Services::from_config(cfg).unwrap();
        assert!(matches!(
            services.classifier().err(),
            Some(RiskError::ClassificationUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn non_pdf_upload_is_unsupported() {
        let services = Services::from_config(config::defaults().unwrap()).unwrap();
        let err = services
            .analyze_document(b"just some text".to_vec(), "txt")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RiskError::UnsupportedFormat(_)));
    }
}
