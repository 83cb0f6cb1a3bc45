//! Bearer session tokens (JWT, HS256).

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
use serde::Serialize;

use lori_domain::id::UserId;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Errors returned by [`validate_session_token`] and [`issue_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload shared by token creation (auth service) and validation.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `iat` | `iat` | issue time, seconds since epoch |
/// | `exp` | `exp` | expiry, seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_AUTH_SERVICE`** feature: only the
/// auth service issues sessions.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test), derive(Serialize))]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

fn from_unix(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(secs, 0).ok_or(AuthError::Malformed)
}

fn decode_jwt(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    // Default leeway (60s) absorbs clock skew between the issuer and other services.
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token value, returning the session identity.
///
/// Protected routes trust any token that is well-formed, correctly signed and unexpired.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<UserId>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        issued_at: from_unix(claims.iat)?,
        expires_at: from_unix(claims.exp)?,
    })
}

/// A freshly signed session token with its decoded identity.
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub info: SessionInfo,
}

/// Sign a session for `user_id` valid from `issued_at` for `ttl`.
///
/// Timestamps are truncated to whole seconds so `info` matches the claims exactly.
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
pub fn issue_session_token(
    user_id: UserId,
    issued_at: DateTime<Utc>,
    ttl: chrono::Duration,
    secret: &str,
) -> Result<IssuedSession, AuthError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let iat = issued_at.timestamp();
    let exp = iat + ttl.num_seconds();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;

    Ok(IssuedSession {
        token,
        info: SessionInfo {
            user_id,
            issued_at: from_unix(iat)?,
            expires_at: from_unix(exp)?,
        },
    })
}
