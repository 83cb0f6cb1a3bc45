use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tokio::sync::watch;

use lori_reports::domain::types::TickSummary;
use lori_reports::router::build_router;
use lori_reports::state::AppState;

fn server(last_tick: Option<TickSummary>) -> TestServer {
    let (_tx, rx) = watch::channel(last_tick);
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        last_tick: rx,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    server(None).get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn readyz_reports_database_and_no_tick_yet() {
    let resp = server(None).get("/readyz").await;

    resp.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json();
    assert_eq!(body["checks"]["database"], "unavailable");
    assert!(body["last_tick"].is_null());
}

#[tokio::test]
async fn readyz_includes_last_tick_summary() {
    let summary = TickSummary {
        finished_at: Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 3).unwrap(),
        due: 3,
        sent: 2,
        failed: 1,
    };

    let body: Value = server(Some(summary)).get("/readyz").await.json();

    assert_eq!(body["last_tick"]["finished_at"], "2024-05-10T00:00:03.000Z");
    assert_eq!(body["last_tick"]["sent"], 2);
    assert_eq!(body["last_tick"]["failed"], 1);
}
