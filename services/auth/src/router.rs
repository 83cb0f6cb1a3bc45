use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::Value;

use lori_core::health::{healthz, readiness};
use lori_core::middleware::with_http_layers;

use crate::handlers::{
    login::{request_login, verify_login},
    session::current_session,
};
use crate::infra::db::ping;
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    readiness(&[("database", ping(&state.db).await)])
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Login
        .route("/auth/login", post(request_login))
        .route("/auth/login/verify", post(verify_login))
        // Session
        .route("/auth/session", get(current_session))
        .with_state(state);

    with_http_layers(router)
}
