use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info};

use lori_core::clock::Clock;

use crate::domain::repository::ChallengeStore;
use crate::error::AuthServiceError;

/// Periodically drops expired challenges so abandoned logins do not pile up.
pub struct ChallengeSweeper<S, K>
where
    S: ChallengeStore,
    K: Clock,
{
    pub challenges: S,
    pub clock: K,
}

impl<S, K> ChallengeSweeper<S, K>
where
    S: ChallengeStore,
    K: Clock,
{
    pub async fn sweep_once(&self) -> Result<usize, AuthServiceError> {
        let removed = self.challenges.purge_expired(self.clock.now()).await?;
        if removed > 0 {
            debug!(removed, "expired challenges purged");
        }
        Ok(removed)
    }

    /// Sweep every `period` until `shutdown` turns true.
    pub async fn run(self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(period_secs = period.as_secs(), "challenge sweeper started");
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        error!(error = %e, "challenge sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("challenge sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}
