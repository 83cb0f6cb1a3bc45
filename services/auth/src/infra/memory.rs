use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::repository::ChallengeStore;
use crate::domain::types::Challenge;
use crate::error::AuthServiceError;

/// Process-local challenge store.
///
/// Per-email atomicity comes from the shard lock held by `entry`. The
/// capacity bound is checked before insert and may be overshot by the number
/// of concurrent first-time requests.
pub struct InMemoryChallengeStore {
    challenges: DashMap<String, Challenge>,
    capacity: usize,
    max_attempts: u32,
}

impl InMemoryChallengeStore {
    pub fn new(capacity: usize, max_attempts: u32) -> Self {
        Self {
            challenges: DashMap::new(),
            capacity,
            max_attempts,
        }
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn get(&self, email: &str) -> Option<Challenge> {
        self.challenges.get(email).map(|c| c.clone())
    }

    fn retain_live(&self, now: DateTime<Utc>) -> usize {
        let before = self.challenges.len();
        self.challenges.retain(|_, c| c.is_live_at(now));
        before.saturating_sub(self.challenges.len())
    }
}

impl ChallengeStore for InMemoryChallengeStore {
    async fn replace(&self, challenge: &Challenge) -> Result<(), AuthServiceError> {
        if !self.challenges.contains_key(&challenge.email)
            && self.challenges.len() >= self.capacity
        {
            self.retain_live(challenge.created_at);
            if self.challenges.len() >= self.capacity {
                tracing::warn!(capacity = self.capacity, "challenge store full");
                return Err(AuthServiceError::TooManyChallenges);
            }
        }
        self.challenges
            .insert(challenge.email.clone(), challenge.clone());
        Ok(())
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Challenge>, AuthServiceError> {
        let Entry::Occupied(mut entry) = self.challenges.entry(email.to_owned()) else {
            return Ok(None);
        };

        if !entry.get().is_live_at(now) {
            entry.remove();
            return Ok(None);
        }

        if entry.get().code != code {
            let attempts = {
                let c = entry.get_mut();
                c.attempts += 1;
                c.attempts
            };
            if attempts >= self.max_attempts {
                entry.remove();
                tracing::warn!(attempts, "challenge discarded after too many wrong codes");
            }
            return Ok(None);
        }

        Ok(Some(entry.remove()))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthServiceError> {
        Ok(self.retain_live(now))
    }
}
