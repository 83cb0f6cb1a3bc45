use std::sync::Arc;
use std::time::Duration;

use sea_orm::Database;
use tokio::sync::watch;
use tracing::info;

use lori_auth::config::AuthConfig;
use lori_auth::infra::ChallengeBackend;
use lori_auth::infra::cache::RedisChallengeStore;
use lori_auth::infra::memory::InMemoryChallengeStore;
use lori_auth::router::build_router;
use lori_auth::state::AppState;
use lori_auth::usecase::session::SessionSettings;
use lori_auth::usecase::sweep::ChallengeSweeper;
use lori_core::clock::SystemClock;
use lori_notify::{MailConfig, Mailer};

#[tokio::main]
async fn main() {
    lori_core::tracing::init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let challenges = match &config.redis_url {
        Some(url) => {
            let pool = deadpool_redis::Config::from_url(url)
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))
                .expect("failed to create Redis pool");
            ChallengeBackend::Redis(RedisChallengeStore {
                pool,
                max_attempts: config.otp_max_attempts,
            })
        }
        None => ChallengeBackend::Memory(Arc::new(InMemoryChallengeStore::new(
            config.otp_store_capacity,
            config.otp_max_attempts,
        ))),
    };
    info!(backend = challenges.name(), "challenge store ready");

    let mailer = Mailer::from_config(&MailConfig::from_env()).expect("invalid mail configuration");

    let settings = SessionSettings {
        otp_ttl: chrono::Duration::seconds(config.otp_ttl_secs),
        session_ttl: chrono::Duration::seconds(config.session_ttl_secs),
        session_secret: config.session_secret.into(),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = ChallengeSweeper {
        challenges: challenges.clone(),
        clock: SystemClock,
    };
    let sweeper_task = tokio::spawn(sweeper.run(
        Duration::from_secs(config.otp_sweep_interval_secs),
        shutdown_rx,
    ));

    let state = AppState {
        db,
        challenges,
        mailer,
        settings,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("server error");

    let _ = shutdown_tx.send(true);
    let _ = sweeper_task.await;
    info!("auth service stopped");
}
