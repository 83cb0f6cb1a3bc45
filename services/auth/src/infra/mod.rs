pub mod cache;
pub mod db;
pub mod memory;
pub mod password;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::repository::ChallengeStore;
use crate::domain::types::Challenge;
use crate::error::AuthServiceError;
use cache::RedisChallengeStore;
use memory::InMemoryChallengeStore;

/// Challenge store selected at startup: Redis when `REDIS_URL` is set, otherwise
/// the process-local map.
#[derive(Clone)]
pub enum ChallengeBackend {
    Memory(Arc<InMemoryChallengeStore>),
    Redis(RedisChallengeStore),
}

impl ChallengeBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }
}

impl ChallengeStore for ChallengeBackend {
    async fn replace(&self, challenge: &Challenge) -> Result<(), AuthServiceError> {
        match self {
            Self::Memory(store) => store.replace(challenge).await,
            Self::Redis(store) => store.replace(challenge).await,
        }
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Challenge>, AuthServiceError> {
        match self {
            Self::Memory(store) => store.consume(email, code, now).await,
            Self::Redis(store) => store.consume(email, code, now).await,
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthServiceError> {
        match self {
            Self::Memory(store) => store.purge_expired(now).await,
            Self::Redis(store) => store.purge_expired(now).await,
        }
    }
}
