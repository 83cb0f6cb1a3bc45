use std::sync::Arc;

use anyhow::Context as _;
use chrono::Duration;
use rand::RngExt;
use tracing::{info, warn};

use lori_auth_types::token::{IssuedSession, issue_session_token};
use lori_core::clock::Clock;
use lori_domain::id::UserId;
use lori_notify::{EmailMessage, NotificationGateway};

use crate::domain::repository::{ChallengeStore, CredentialStore};
use crate::domain::types::{AuthUser, Challenge, OTP_MAX, OTP_MIN, normalize_email};
use crate::error::AuthServiceError;

/// Uniform 6-digit code in `OTP_MIN..=OTP_MAX`.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(OTP_MIN..=OTP_MAX).to_string()
}

/// Lifetimes and signing material for the login flow.
#[derive(Clone)]
pub struct SessionSettings {
    pub otp_ttl: Duration,
    pub session_ttl: Duration,
    pub session_secret: Arc<str>,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("otp_ttl", &self.otp_ttl)
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

fn login_code_email(user: &AuthUser, code: &str, ttl: Duration) -> EmailMessage {
    EmailMessage {
        to: user.email.clone(),
        subject: "Your Lori Logistics Login OTP".to_owned(),
        text: format!(
            "Hi {name},\n\nYour OTP for login is: {code}\n\nThis OTP is valid for {minutes} minutes.\n\nBest regards,\nThe Lori Logistics Team",
            name = user.name,
            minutes = ttl.num_minutes(),
        ),
    }
}

pub struct RequestLoginInput {
    pub email: String,
    pub password: String,
}

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub user: AuthUser,
    pub session: IssuedSession,
}

/// Password → one-time code → bearer session.
///
/// ```text
/// request_login: verify password ─▶ replace challenge ─▶ mail code
/// verify_otp:    load user ─▶ consume challenge (atomic) ─▶ sign session
/// ```
pub struct AuthSessionManager<C, S, N, K>
where
    C: CredentialStore,
    S: ChallengeStore,
    N: NotificationGateway,
    K: Clock,
{
    pub credentials: C,
    pub challenges: S,
    pub notifier: N,
    pub clock: K,
    pub settings: SessionSettings,
}

impl<C, S, N, K> AuthSessionManager<C, S, N, K>
where
    C: CredentialStore,
    S: ChallengeStore,
    N: NotificationGateway,
    K: Clock,
{
    /// Check the password and mail a fresh one-time code.
    ///
    /// On delivery failure the challenge stays stored; the caller sees
    /// [`AuthServiceError::NotificationDeliveryFailure`] and may retry.
    pub async fn request_login(&self, input: RequestLoginInput) -> Result<(), AuthServiceError> {
        let email = normalize_email(&input.email);

        let user = self
            .credentials
            .verify_password(&email, &input.password)
            .await?
            .ok_or(AuthServiceError::InvalidCredential)?;

        let challenge = Challenge::new(
            &email,
            generate_code(),
            self.clock.now(),
            self.settings.otp_ttl,
        );
        self.challenges.replace(&challenge).await?;

        let message = login_code_email(&user, &challenge.code, self.settings.otp_ttl);
        self.notifier.send(&message).await.map_err(|e| {
            warn!(user_id = %user.id, error = %e, "login code delivery failed");
            AuthServiceError::NotificationDeliveryFailure(e)
        })?;

        info!(user_id = %user.id, expires_at = %challenge.expires_at, "login code issued");
        Ok(())
    }

    /// Exchange a live one-time code for a session token. Single use.
    pub async fn verify_otp(
        &self,
        input: VerifyOtpInput,
    ) -> Result<VerifyOtpOutput, AuthServiceError> {
        let email = normalize_email(&input.email);
        let code = input.code.trim();
        let now = self.clock.now();

        // Load the user before spending the code, so a failed lookup leaves it
        // usable. The account can also disappear between request and verify.
        let user = self
            .credentials
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidOrExpiredOtp)?;

        self.challenges
            .consume(&email, code, now)
            .await?
            .ok_or(AuthServiceError::InvalidOrExpiredOtp)?;

        let session = issue_session_token(
            UserId(user.id),
            now,
            self.settings.session_ttl,
            &self.settings.session_secret,
        )
        .context("sign session token")?;

        info!(user_id = %user.id, expires_at = %session.info.expires_at, "session issued");
        Ok(VerifyOtpOutput { user, session })
    }
}
