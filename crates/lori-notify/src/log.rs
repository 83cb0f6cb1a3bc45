use crate::{EmailMessage, NotificationGateway, NotifyError};

/// Development gateway: records the message in the log instead of sending it.
///
/// The body is logged at `debug` only, since it may carry one-time codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogGateway;

impl NotificationGateway for LogGateway {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        tracing::info!(to = %message.to, subject = %message.subject, "email (not sent, log gateway)");
        tracing::debug!(to = %message.to, body = %message.text, "email body");
        Ok(())
    }
}
