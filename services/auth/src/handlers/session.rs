use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use lori_auth_types::bearer::BearerSession;
use lori_core::serde::to_rfc3339_ms;

// ── GET /auth/session ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub issued_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn current_session(BearerSession(info): BearerSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: info.user_id.into(),
        issued_at: info.issued_at,
        expires_at: info.expires_at,
    })
}
