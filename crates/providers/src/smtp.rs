use crate::{MailRelay, OutgoingMail, ProviderError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    /// TLS from the first byte (SMTPS, usually port 465).
    Implicit,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
    pub sender: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// Mail relay speaking authenticated SMTP over TLS.
#[derive(Clone)]
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpRelay {
    pub fn new(cfg: SmtpConfig) -> Result<Self, ProviderError> {
        let sender: Mailbox = cfg
            .sender
            .parse()
            .map_err(|e| ProviderError::Misconfigured(format!("sender address: {e}")))?;
        let builder = match cfg.tls {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host),
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host),
        }
        .map_err(|e| ProviderError::Misconfigured(format!("smtp host {}: {e}", cfg.host)))?;
        let transport = builder
            .port(cfg.port)
            .credentials(Credentials::new(cfg.username, cfg.password))
            .timeout(Some(cfg.timeout))
            .build();
        Ok(Self { transport, sender })
    }
}

pub(crate) fn build_message(
    sender: &Mailbox,
    mail: &OutgoingMail,
) -> Result<Message, ProviderError> {
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| ProviderError::InvalidInput(format!("recipient {:?}: {e}", mail.to)))?;
    Message::builder()
        .from(sender.clone())
        .to(to)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| ProviderError::InvalidInput(e.to_string()))
}

#[async_trait::async_trait]
impl MailRelay for SmtpRelay {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), ProviderError> {
        let message = build_message(&self.sender, mail)?;
        let resp = self
            .transport
            .send(message)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        debug!(code = %resp.code(), "smtp relay accepted message");
        Ok(())
    }
}
