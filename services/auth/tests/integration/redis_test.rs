//! Redis challenge store against a live server. Skipped unless `REDIS_URL` is set.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use deadpool_redis::{Config, Runtime};
use uuid::Uuid;

use lori_auth::domain::repository::ChallengeStore;
use lori_auth::domain::types::Challenge;
use lori_auth::infra::cache::RedisChallengeStore;

fn redis_store(max_attempts: u32) -> Option<RedisChallengeStore> {
    let url = std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty())?;
    let pool = Config::from_url(url)
        .create_pool(Some(Runtime::Tokio1))
        .unwrap();
    Some(RedisChallengeStore { pool, max_attempts })
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

/// Fresh address per test so parallel runs never share a key.
fn email() -> String {
    format!("{}@lorilogistics.com", Uuid::new_v4())
}

fn challenge(email: &str, code: &str) -> Challenge {
    Challenge::new(email, code.into(), t0(), Duration::minutes(5))
}

#[tokio::test]
async fn should_consume_matching_code_once() {
    let Some(store) = redis_store(5) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();

    let got = store.consume(&email, "111111", t0()).await.unwrap().unwrap();
    assert_eq!(got.email, email);
    assert_eq!(got.code, "111111");
    assert_eq!(got.created_at, t0());
    assert_eq!(got.expires_at, t0() + Duration::minutes(5));
    assert_eq!(got.attempts, 0);

    assert!(store.consume(&email, "111111", t0()).await.unwrap().is_none());
}

#[tokio::test]
async fn should_invalidate_previous_code_on_replace() {
    let Some(store) = redis_store(5) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();
    store.replace(&challenge(&email, "222222")).await.unwrap();

    assert!(store.consume(&email, "111111", t0()).await.unwrap().is_none());
    let got = store.consume(&email, "222222", t0()).await.unwrap().unwrap();
    // The wrong guess above was charged to the new challenge only.
    assert_eq!(got.attempts, 1);
}

#[tokio::test]
async fn should_reset_attempts_on_replace() {
    let Some(store) = redis_store(5) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();
    store.consume(&email, "000000", t0()).await.unwrap();
    store.consume(&email, "000000", t0()).await.unwrap();

    store.replace(&challenge(&email, "222222")).await.unwrap();
    let got = store.consume(&email, "222222", t0()).await.unwrap().unwrap();
    assert_eq!(got.attempts, 0);
}

#[tokio::test]
async fn should_reject_one_instant_past_expiry_and_drop_challenge() {
    let Some(store) = redis_store(5) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();

    let late = t0() + Duration::minutes(5) + Duration::milliseconds(1);
    assert!(store.consume(&email, "111111", late).await.unwrap().is_none());
    // Gone, not merely rejected.
    assert!(store.consume(&email, "111111", t0()).await.unwrap().is_none());
}

#[tokio::test]
async fn should_accept_code_at_expiry_instant() {
    let Some(store) = redis_store(5) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();

    let edge = t0() + Duration::minutes(5);
    assert!(store.consume(&email, "111111", edge).await.unwrap().is_some());
}

#[tokio::test]
async fn should_count_wrong_codes_and_discard_at_limit() {
    let Some(store) = redis_store(3) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();

    for _ in 0..3 {
        assert!(store.consume(&email, "000000", t0()).await.unwrap().is_none());
    }
    assert!(store.consume(&email, "111111", t0()).await.unwrap().is_none());
}

#[tokio::test]
async fn should_accept_right_code_below_attempt_limit() {
    let Some(store) = redis_store(3) else { return };
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();

    for _ in 0..2 {
        assert!(store.consume(&email, "000000", t0()).await.unwrap().is_none());
    }
    let got = store.consume(&email, "111111", t0()).await.unwrap().unwrap();
    assert_eq!(got.attempts, 2);
}

#[tokio::test]
async fn should_miss_unknown_email() {
    let Some(store) = redis_store(5) else { return };
    assert!(store.consume(&email(), "111111", t0()).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_consumers_get_exactly_one_success() {
    let Some(store) = redis_store(100) else { return };
    let store = Arc::new(store);
    let email = email();
    store.replace(&challenge(&email, "111111")).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            let email = email.clone();
            tokio::spawn(async move { store.consume(&email, "111111", t0()).await })
        })
        .collect();

    let mut wins = 0;
    for h in handles {
        if h.await.unwrap().unwrap().is_some() {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);
}
