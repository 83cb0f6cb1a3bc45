//! Outbound notifications (email) shared by the auth and reports services.
//!
//! Services depend on the [`NotificationGateway`] port; [`Mailer`] selects the
//! concrete transport from [`MailConfig`] at startup.

#![allow(async_fn_in_trait)]

mod log;
mod smtp;

pub use log::LogGateway;
pub use smtp::SmtpGateway;

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("invalid mail configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("send failed: {0}")]
    Send(String),
}

/// Port for delivering a message to an address. Sends may fail transiently.
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

impl<G: NotificationGateway + ?Sized> NotificationGateway for std::sync::Arc<G> {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        (**self).send(message).await
    }
}

/// SMTP settings. Env vars: `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`,
/// `SMTP_PASSWORD`, `SMTP_TLS`, `MAIL_FROM`.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Relay host. `None` selects the log-only gateway (local development).
    pub smtp_host: Option<String>,
    /// Relay port (default 587; 465 switches to implicit TLS).
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// Require TLS (default true).
    pub smtp_tls: bool,
    /// `From` header, e.g. `Lori Logistics <no-reply@lorilogistics.com>`.
    pub from: String,
}

pub const DEFAULT_MAIL_FROM: &str = "Lori Logistics <no-reply@lorilogistics.com>";

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            smtp_tls: std::env::var("SMTP_TLS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_owned()),
        }
    }
}

/// Gateway chosen from configuration.
#[derive(Clone)]
pub enum Mailer {
    Smtp(SmtpGateway),
    Log(LogGateway),
}

impl Mailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        match &config.smtp_host {
            Some(host) => Ok(Self::Smtp(SmtpGateway::new(
                host,
                config.smtp_port,
                config.smtp_username.clone(),
                config.smtp_password.clone(),
                config.smtp_tls,
                &config.from,
            )?)),
            None => {
                tracing::warn!("SMTP_HOST not set; outbound mail is only logged");
                Ok(Self::Log(LogGateway))
            }
        }
    }
}

impl NotificationGateway for Mailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        match self {
            Self::Smtp(gateway) => gateway.send(message).await,
            Self::Log(gateway) => gateway.send(message).await,
        }
    }
}
