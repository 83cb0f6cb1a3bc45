use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Credential-holding user as seen by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Outstanding one-time login code for an email. At most one per email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Wrong codes submitted against this challenge so far.
    pub attempts: u32,
}

impl Challenge {
    pub fn new(email: &str, code: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            email: email.to_owned(),
            code,
            created_at: now,
            expires_at: now + ttl,
            attempts: 0,
        }
    }

    /// Still verifiable at `now` (the expiry instant itself is inclusive).
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

/// Canonical challenge / credential key for an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Lowest and highest one-time codes (6 digits, no leading zero).
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// Default one-time code lifetime in seconds (5 minutes).
pub const DEFAULT_OTP_TTL_SECS: i64 = 300;

/// Default session lifetime in seconds (1 hour).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

/// Default wrong-code budget per challenge.
pub const DEFAULT_OTP_MAX_ATTEMPTS: u32 = 5;

/// Default number of challenges the in-memory store holds.
pub const DEFAULT_CHALLENGE_CAPACITY: usize = 10_000;
