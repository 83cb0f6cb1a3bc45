use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio::sync::watch;

use lori_auth::domain::repository::ChallengeStore;
use lori_auth::domain::types::Challenge;
use lori_auth::infra::ChallengeBackend;
use lori_auth::infra::memory::InMemoryChallengeStore;
use lori_auth::usecase::sweep::ChallengeSweeper;
use lori_core::clock::Clock;
use lori_testing::clock::ManualClock;

async fn seeded(clock: &ManualClock) -> Arc<InMemoryChallengeStore> {
    let store = Arc::new(InMemoryChallengeStore::new(100, 5));
    for (i, ttl) in [1, 2, 30].into_iter().enumerate() {
        let c = Challenge::new(
            &format!("driver{i}@lorilogistics.com"),
            "123456".into(),
            clock.now(),
            Duration::minutes(ttl),
        );
        store.replace(&c).await.unwrap();
    }
    store
}

#[tokio::test]
async fn should_purge_only_challenges_past_expiry() {
    let clock = ManualClock::at_date(2024, 5, 1);
    let store = seeded(&clock).await;
    let sweeper = ChallengeSweeper {
        challenges: ChallengeBackend::Memory(Arc::clone(&store)),
        clock: clock.clone(),
    };

    assert_eq!(sweeper.sweep_once().await.unwrap(), 0);

    clock.advance(Duration::minutes(5));
    assert_eq!(sweeper.sweep_once().await.unwrap(), 2);
    assert_eq!(store.len(), 1);
    assert!(store.get("driver2@lorilogistics.com").is_some());
}

#[tokio::test(start_paused = true)]
async fn should_sweep_on_interval_until_shutdown() {
    let clock = ManualClock::at_date(2024, 5, 1);
    let store = seeded(&clock).await;
    clock.advance(Duration::hours(1));

    let (tx, rx) = watch::channel(false);
    let sweeper = ChallengeSweeper {
        challenges: ChallengeBackend::Memory(Arc::clone(&store)),
        clock: clock.clone(),
    };
    let task = tokio::spawn(sweeper.run(StdDuration::from_secs(60), rx));

    tokio::time::sleep(StdDuration::from_secs(1)).await;
    assert!(store.is_empty());

    tx.send(true).unwrap();
    task.await.unwrap();
}
