use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use lori_core::serde::to_rfc3339_ms;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::session::{RequestLoginInput, VerifyOtpInput};

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn request_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    state
        .session_manager()
        .request_login(RequestLoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "message": "login code sent" })),
    ))
}

// ── POST /auth/login/verify ───────────────────────────────────────────────────

/// Clients send the code as typed; accept `"042917"`-style strings and bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum OtpCode {
    Text(String),
    Number(u64),
}

impl From<OtpCode> for String {
    fn from(code: OtpCode) -> Self {
        match code {
            OtpCode::Text(s) => s,
            OtpCode::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: OtpCode,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub session_token: String,
    pub token_type: &'static str,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn verify_login(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let out = state
        .session_manager()
        .verify_otp(VerifyOtpInput {
            email: body.email,
            code: body.code.into(),
        })
        .await?;

    Ok(Json(VerifyResponse {
        session_token: out.session.token,
        token_type: "Bearer",
        expires_at: out.session.info.expires_at,
    }))
}
