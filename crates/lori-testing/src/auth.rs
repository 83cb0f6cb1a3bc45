//! Bearer-session helpers for router tests.

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use chrono::{Duration, Utc};
use uuid::Uuid;

use lori_auth_types::token::issue_session_token;
use lori_domain::id::UserId;

/// Signs a real session token so protected routes can be exercised end to end.
pub struct TestSession {
    pub user_id: UserId,
    pub token: String,
}

impl TestSession {
    /// One-hour session for `user_id` signed with `secret`.
    pub fn new(user_id: Uuid, secret: &str) -> Self {
        let user_id = UserId(user_id);
        let issued = issue_session_token(user_id, Utc::now(), Duration::hours(1), secret)
            .expect("sign test session");
        Self {
            user_id,
            token: issued.token,
        }
    }

    /// `Authorization: Bearer <token>` header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token)).expect("ascii token"),
        )
    }
}
