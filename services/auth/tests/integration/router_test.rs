use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use lori_auth::domain::repository::ChallengeStore;
use lori_auth::domain::types::Challenge;
use lori_auth::infra::ChallengeBackend;
use lori_auth::infra::memory::InMemoryChallengeStore;
use lori_auth::router::build_router;
use lori_auth::state::AppState;
use lori_notify::{LogGateway, Mailer};
use lori_testing::auth::TestSession;

use crate::helpers::{TEST_SESSION_SECRET, test_settings};

/// Router over a disconnected database; only routes that never reach
/// Postgres can succeed.
fn server() -> (TestServer, Arc<InMemoryChallengeStore>) {
    let store = Arc::new(InMemoryChallengeStore::new(100, 5));
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        challenges: ChallengeBackend::Memory(Arc::clone(&store)),
        mailer: Mailer::Log(LogGateway),
        settings: test_settings(),
    };
    (TestServer::new(build_router(state)).unwrap(), store)
}

#[tokio::test]
async fn healthz_is_ok() {
    let (server, _) = server();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn readyz_reports_unavailable_database() {
    let (server, _) = server();
    let resp = server.get("/readyz").await;
    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json();
    assert_eq!(body["checks"]["database"], "unavailable");
}

#[tokio::test]
async fn should_echo_request_id() {
    let (server, _) = server();
    let resp = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(resp.header("x-request-id"), "req-123");
}

#[tokio::test]
async fn session_accepts_issued_token() {
    let (server, _) = server();
    let user_id = Uuid::new_v4();
    let session = TestSession::new(user_id, TEST_SESSION_SECRET);
    let (name, value) = session.header();

    let resp = server.get("/auth/session").add_header(name, value).await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["user_id"], user_id.to_string());
    assert!(body["expires_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn session_rejects_tampered_token() {
    let (server, _) = server();
    let session = TestSession::new(Uuid::new_v4(), "some-other-secret");
    let (name, value) = session.header();

    let resp = server.get("/auth/session").add_header(name, value).await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_SESSION");
}

#[tokio::test]
async fn session_rejects_missing_header() {
    let (server, _) = server();
    server
        .get("/auth/session")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn verify_rejects_body_without_code() {
    let (server, _) = server();

    let resp = server
        .post("/auth/login/verify")
        .json(&json!({ "email": "dispatcher@lorilogistics.com" }))
        .await;

    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn verify_leaves_challenge_untouched_when_user_lookup_fails() {
    let (server, store) = server();
    let challenge = Challenge::new(
        "dispatcher@lorilogistics.com",
        "654321".into(),
        Utc::now(),
        Duration::minutes(5),
    );
    store.replace(&challenge).await.unwrap();

    let resp = server
        .post("/auth/login/verify")
        .json(&json!({ "email": "Dispatcher@LoriLogistics.com", "code": "654321" }))
        .await;

    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INTERNAL");
    let kept = store.get("dispatcher@lorilogistics.com").unwrap();
    assert_eq!(kept.code, "654321");
    assert_eq!(kept.attempts, 0);
}
