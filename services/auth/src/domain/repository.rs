#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{AuthUser, Challenge};
use crate::error::AuthServiceError;

/// Port for user lookup and password verification.
pub trait CredentialStore: Send + Sync {
    /// Return the user only if `email` exists and `password` matches its hash.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError>;
}

/// Store of outstanding one-time login challenges, keyed by normalized email.
///
/// Every method is atomic with respect to a single email: a `consume` never
/// observes a half-written `replace`, and two racing `consume` calls for the
/// same live challenge cannot both return it.
pub trait ChallengeStore: Send + Sync {
    /// Insert `challenge`, discarding any existing challenge for the same email.
    async fn replace(&self, challenge: &Challenge) -> Result<(), AuthServiceError>;

    /// Check `code` against the email's challenge.
    ///
    /// Returns the challenge, now deleted, when it exists, is live at `now` and
    /// the code matches. A wrong code counts against the attempt budget and the
    /// challenge is dropped once the budget is spent; an expired challenge is
    /// dropped when seen.
    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Challenge>, AuthServiceError>;

    /// Delete challenges that expired before `now`. Returns how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthServiceError>;
}
