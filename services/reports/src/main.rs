use std::sync::Arc;
use std::time::Duration;

use sea_orm::Database;
use tokio::sync::watch;
use tracing::info;

use lori_core::clock::SystemClock;
use lori_notify::{MailConfig, Mailer};
use lori_reports::config::ReportsConfig;
use lori_reports::router::build_router;
use lori_reports::runner::TriggerLoop;
use lori_reports::state::AppState;
use lori_reports::usecase::tick::RecurringScheduler;

#[tokio::main]
async fn main() {
    lori_core::tracing::init_tracing();

    let config = ReportsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = Mailer::from_config(&MailConfig::from_env()).expect("invalid mail configuration");

    let (status_tx, status_rx) = watch::channel(None);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let state = AppState {
        db,
        last_tick: status_rx,
    };

    let scheduler = Arc::new(RecurringScheduler::new(
        state.report_store(),
        mailer,
        config.dispatch_concurrency,
    ));
    let trigger = TriggerLoop {
        scheduler,
        clock: SystemClock,
        period: Duration::from_secs(config.tick_interval_secs),
        tick_on_start: config.tick_on_start,
        status: status_tx,
    };
    let trigger_task = tokio::spawn(trigger.run(shutdown_rx));

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.reports_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("reports service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("server error");

    let _ = shutdown_tx.send(true);
    let _ = trigger_task.await;
    info!("reports service stopped");
}
