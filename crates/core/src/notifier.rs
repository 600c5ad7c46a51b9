use crate::config::AlertMode;
use crate::error::{Result, RiskError};
use crate::models::AlertRequest;
use email_address::EmailAddress;
use providers::{MailRelay, OutgoingMail};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Nothing left the process; the alert was only acknowledged.
    Simulated { to: String },
    Delivered { to: String },
}

/// Sends one alert per call. No retries, no queueing.
#[derive(Clone)]
pub struct AlertNotifier {
    mode: AlertMode,
    relay: Option<Arc<dyn MailRelay>>,
    timeout: Duration,
}

impl AlertNotifier {
    pub fn simulated() -> Self {
        Self {
            mode: AlertMode::Simulated,
            relay: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn live(relay: Arc<dyn MailRelay>, timeout: Duration) -> Self {
        Self {
            mode: AlertMode::Live,
            relay: Some(relay),
            timeout,
        }
    }

    pub fn mode(&self) -> AlertMode {
        self.mode
    }

    pub async fn send(&self, request: &AlertRequest) -> Result<AlertOutcome> {
        let to = request.to.trim();
        if to.is_empty() {
            return Err(RiskError::InputValidation(
                "destination address is empty".to_string(),
            ));
        }

        match (self.mode, &self.relay) {
            (AlertMode::Simulated, _) => {
                info!(to, "alert simulated");
                Ok(AlertOutcome::Simulated { to: to.to_string() })
            }
            (AlertMode::Live, None) => Err(RiskError::Delivery(
                "live alerts enabled but no mail relay is configured".to_string(),
            )),
            (AlertMode::Live, Some(relay)) => {
                if let Err(e) = EmailAddress::from_str(to) {
                    return Err(RiskError::Delivery(format!("malformed address {to:?}: {e}")));
                }
                let mail = OutgoingMail {
                    to: to.to_string(),
                    subject: request.subject.clone(),
                    body: request.body.clone(),
                };
                match tokio::time::timeout(self.timeout, relay.deliver(&mail)).await {
                    Ok(Ok(())) => {
                        info!(to, "alert delivered");
                        Ok(AlertOutcome::Delivered { to: to.to_string() })
                    }
                    Ok(Err(e)) => {
                        warn!(to, error = %e, "alert delivery failed");
                        Err(RiskError::delivery(e))
                    }
                    Err(_) => {
                        warn!(to, "alert delivery timed out");
                        Err(RiskError::Delivery(format!(
                            "relay did not answer within {:?}",
                            self.timeout
                        )))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use providers::ProviderError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRelay {
        sent: Mutex<Vec<OutgoingMail>>,
        reject: bool,
    }

    #[async_trait::async_trait]
    impl MailRelay for RecordingRelay {
        async fn deliver(&self, mail: &OutgoingMail) -> std::result::Result<(), ProviderError> {
            if self.reject {
                return Err(ProviderError::RequestFailed("535 authentication failed".into()));
            }
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    struct StalledRelay;

    #[async_trait::async_trait]
    impl MailRelay for StalledRelay {
        async fn deliver(&self, _mail: &OutgoingMail) -> std::result::Result<(), ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    fn request(to: &str) -> AlertRequest {
        AlertRequest {
            to: to.to_string(),
            subject: "Supplier Risk Alert".to_string(),
            body: "Bosch delays above 4 days".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_address_is_rejected_without_delivery() {
        let relay = Arc::new(RecordingRelay::default());
        let notifier = AlertNotifier::live(relay.clone(), Duration::from_secs(1));
        let err = notifier.send(&request("  ")).await.unwrap_err();
        assert!(matches!(err, RiskError::InputValidation(_)));
        assert!(relay.sent.lock().unwrap().is_empty());

        let err = AlertNotifier::simulated().send(&request("")).await.unwrap_err();
        assert!(matches!(err, RiskError::InputValidation(_)));
    }

    #[tokio::test]
    async fn simulated_mode_only_acknowledges() {
        let outcome = AlertNotifier::simulated()
            .send(&request("buyer@example.com"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            AlertOutcome::Simulated {
                to: "buyer@example.com".into()
            }
        );
    }

    #[tokio::test]
    async fn live_mode_delivers_exactly_once() {
        let relay = Arc::new(RecordingRelay::default());
        let notifier = AlertNotifier::live(relay.clone(), Duration::from_secs(1));
        let outcome = notifier.send(&request("buyer@example.com")).await.unwrap();
        assert!(matches!(outcome, AlertOutcome::Delivered { .. }));
        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Supplier Risk Alert");
    }

    #[tokio::test]
    async fn malformed_address_is_a_delivery_error() {
        let relay = Arc::new(RecordingRelay::default());
        let notifier = AlertNotifier::live(relay.clone(), Duration::from_secs(1));
        let err = notifier.send(&request("buyer-at-example")).await.unwrap_err();
        assert!(matches!(err, RiskError::Delivery(_)));
        assert!(relay.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn relay_failure_is_reported_with_cause() {
        let relay = Arc::new(RecordingRelay {
            reject: true,
            ..RecordingRelay::default()
        });
        let err = AlertNotifier::live(relay, Duration::from_secs(1))
            .send(&request("buyer@example.com"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("535 authentication failed"));
    }

    #[tokio::test]
    async fn unresponsive_relay_times_out() {
        let notifier = AlertNotifier::live(Arc::new(StalledRelay), Duration::from_millis(50));
        let err = notifier
            .send(&request("buyer@example.com"))
            .await
            .unwrap_err();
        assert!(
            matches!(&err, RiskError::Delivery(msg) if msg == "relay did not answer within 50ms"),
            "got {err:?}"
        );
    }
}
