use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Liveness handler for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Build a `GET /readyz` response from named dependency checks.
///
/// Returns 200 when every check passed, 503 otherwise. The body lists each
/// check as `"ok"` or `"unavailable"`.
pub fn readiness(checks: &[(&str, bool)]) -> (StatusCode, Json<Value>) {
    let ready = checks.iter().all(|(_, ok)| *ok);
    let body: serde_json::Map<String, Value> = checks
        .iter()
        .map(|(name, ok)| {
            let state = if *ok { "ok" } else { "unavailable" };
            ((*name).to_owned(), Value::from(state))
        })
        .collect();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(json!({ "ready": ready, "checks": body })))
}
