use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use lori_notify::NotifyError;

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("invalid credential")]
    InvalidCredential,
    #[error("invalid or expired otp")]
    InvalidOrExpiredOtp,
    #[error("notification delivery failed")]
    NotificationDeliveryFailure(#[source] NotifyError),
    #[error("too many pending challenges")]
    TooManyChallenges,
    #[error("invalid session")]
    InvalidSession,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::InvalidOrExpiredOtp => "INVALID_OR_EXPIRED_OTP",
            Self::NotificationDeliveryFailure(_) => "NOTIFICATION_DELIVERY_FAILURE",
            Self::TooManyChallenges => "TOO_MANY_CHALLENGES",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredential | Self::InvalidOrExpiredOtp => StatusCode::BAD_REQUEST,
            Self::NotificationDeliveryFailure(_) => StatusCode::BAD_GATEWAY,
            Self::TooManyChallenges => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer records method/uri/status for every request; only 500s need
        // the anyhow chain here. Delivery failures are already logged by the usecase.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
