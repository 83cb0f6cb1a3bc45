use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::Value;

use lori_core::health::{healthz, readiness};
use lori_core::middleware::with_http_layers;

use crate::infra::db::ping;
use crate::state::AppState;

/// Database readiness plus the last completed tick (`null` before the first).
async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, Json(mut body)) = readiness(&[("database", ping(&state.db).await)]);
    let last_tick = state.last_tick.borrow().clone();
    body["last_tick"] = serde_json::to_value(last_tick).unwrap_or(Value::Null);
    (status, Json(body))
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(state);

    with_http_layers(router)
}
