use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::{EmailMessage, NotificationGateway, NotifyError};

/// SMTP relay gateway.
#[derive(Clone)]
pub struct SmtpGateway {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpGateway {
    pub fn new(
        host: &str,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        use_tls: bool,
        from: &str,
    ) -> Result<Self, NotifyError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| NotifyError::InvalidConfig(format!("MAIL_FROM: {e}")))?;

        let mut builder = if use_tls {
            let tls = TlsParameters::new(host.to_owned())
                .map_err(|e| NotifyError::InvalidConfig(format!("TLS parameters: {e}")))?;
            // 465 is implicit TLS (SMTPS); everything else negotiates STARTTLS.
            if port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| NotifyError::InvalidConfig(format!("SMTP relay: {e}")))?
                    .port(port)
                    .tls(Tls::Wrapper(tls))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| NotifyError::InvalidConfig(format!("SMTP relay: {e}")))?
                    .port(port)
                    .tls(Tls::Required(tls))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port)
        };

        if let (Some(user), Some(pass)) = (username, password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl NotificationGateway for SmtpGateway {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::InvalidAddress {
                address: message.to.clone(),
                reason: e.to_string(),
            })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.text.clone())
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError::Send(e.to_string()))?;

        tracing::debug!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }
}
