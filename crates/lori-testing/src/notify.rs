//! In-memory notification gateway for assertions on outbound mail.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use lori_notify::{EmailMessage, NotificationGateway, NotifyError};

/// Records every message; fails sends to addresses marked with [`fail_for`](Self::fail_for).
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `address` fail with [`NotifyError::Send`].
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_owned());
    }

    pub fn recover(&self, address: &str) {
        self.failing.lock().unwrap().remove(address);
    }

    /// Successfully delivered messages, in send order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<EmailMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.to == address)
            .collect()
    }
}

impl NotificationGateway for RecordingGateway {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        if self.failing.lock().unwrap().contains(&message.to) {
            return Err(NotifyError::Send(format!("{} unreachable", message.to)));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
