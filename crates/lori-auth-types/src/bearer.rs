//! `Authorization: Bearer <session token>` extractor for protected routes.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::StatusCode;
use http::request::Parts;

use crate::token::{SessionInfo, validate_session_token};

/// Signing secret used to validate session tokens.
///
/// Expose it from the router state with `FromRef` to enable [`BearerSession`].
#[derive(Clone)]
pub struct SessionSecret(pub Arc<str>);

impl SessionSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

/// Validated session of the caller.
#[derive(Debug, Clone)]
pub struct BearerSession(pub SessionInfo);

/// 401 with the shared `{kind, message}` error body.
#[derive(Debug)]
pub struct SessionRejection;

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "INVALID_SESSION",
            "message": "invalid session",
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for BearerSession
where
    S: Send + Sync,
    SessionSecret: FromRef<S>,
{
    type Rejection = SessionRejection;

    // Resolve synchronously and hand back a 'static future; see axum-core's
    // `fn -> impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = SessionSecret::from_ref(state);
        let result = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(SessionRejection)
            .and_then(|auth| {
                validate_session_token(auth.token(), &secret.0).map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer session");
                    SessionRejection
                })
            })
            .map(BearerSession);

        async move { result }
    }
}
