use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::MailSender;
use crate::domain::types::OutboundMail;
use crate::error::AccountServiceError;

/// SMTP settings, all-or-nothing from the environment.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl SmtpConfig {
    /// Returns `None` unless SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD and
    /// SMTP_FROM are all present and non-empty. SMTP_PORT defaults to 465.
    pub fn from_env() -> Option<Self> {
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        Some(Self {
            host: get_env("SMTP_HOST")?,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(465),
            username: get_env("SMTP_USERNAME")?,
            password: get_env("SMTP_PASSWORD")?,
            from_address: get_env("SMTP_FROM")?,
        })
    }
}

/// Production mailer over lettre's async SMTP transport.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, AccountServiceError> {
        let from = config
            .from_address
            .parse()
            .map_err(|e: lettre::address::AddressError| AccountServiceError::Internal(e.into()))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| AccountServiceError::Internal(e.into()))?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();
        Ok(Self { transport, from })
    }
}

impl MailSender for SmtpMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<(), AccountServiceError> {
        let to = mail
            .to
            .parse::<Mailbox>()
            .map_err(|e| AccountServiceError::Internal(e.into()))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())
            .map_err(|e| AccountServiceError::Internal(e.into()))?;
        self.transport
            .send(message)
            .await
            .map_err(|e| AccountServiceError::Internal(e.into()))?;
        Ok(())
    }
}

/// Fallback when SMTP is unconfigured: log at warn and report success, so
/// dev environments register and reset without a mail provider.
#[derive(Clone, Copy)]
pub struct LogMailer;

impl MailSender for LogMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<(), AccountServiceError> {
        tracing::warn!(to = %mail.to, subject = %mail.subject, "smtp not configured, mail not sent");
        Ok(())
    }
}

/// Concrete mailer selected at startup; lives in `AppState`.
#[derive(Clone)]
pub enum AnyMailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl MailSender for AnyMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<(), AccountServiceError> {
        match self {
            Self::Smtp(mailer) => mailer.send(mail).await,
            Self::Log(mailer) => mailer.send(mail).await,
        }
    }
}
