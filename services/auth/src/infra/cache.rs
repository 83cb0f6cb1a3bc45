use anyhow::Context as _;
use chrono::{DateTime, TimeZone, Utc};
use deadpool_redis::Pool;
use deadpool_redis::redis::Script;

use crate::domain::repository::ChallengeStore;
use crate::domain::types::Challenge;
use crate::error::AuthServiceError;

/// Extra key lifetime past `expires_at`; the script, not Redis expiry, decides liveness.
const KEY_GRACE_MS: i64 = 1_000;

/// KEYS[1] challenge key. ARGV: code, created_at ms, expires_at ms, key ttl ms.
const REPLACE_SCRIPT: &str = r#"
redis.call('DEL', KEYS[1])
redis.call('HSET', KEYS[1], 'code', ARGV[1], 'created_at', ARGV[2], 'expires_at', ARGV[3], 'attempts', 0)
redis.call('PEXPIRE', KEYS[1], ARGV[4])
return 1
"#;

/// KEYS[1] challenge key. ARGV: submitted code, now ms, max attempts.
/// Returns {code, created_at, expires_at, attempts} on success, nil otherwise.
const CONSUME_SCRIPT: &str = r#"
local h = redis.call('HMGET', KEYS[1], 'code', 'created_at', 'expires_at', 'attempts')
if not h[1] then
  return nil
end
if tonumber(ARGV[2]) > tonumber(h[3]) then
  redis.call('DEL', KEYS[1])
  return nil
end
if h[1] ~= ARGV[1] then
  local n = redis.call('HINCRBY', KEYS[1], 'attempts', 1)
  if n >= tonumber(ARGV[3]) then
    redis.call('DEL', KEYS[1])
  end
  return nil
end
redis.call('DEL', KEYS[1])
return {h[1], h[2], h[3], h[4]}
"#;

/// Challenge store shared by every auth replica. Each operation is one Lua
/// script, so Redis serializes them per key.
#[derive(Clone)]
pub struct RedisChallengeStore {
    pub pool: Pool,
    pub max_attempts: u32,
}

fn challenge_key(email: &str) -> String {
    format!("otp_challenge:{}", email)
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, AuthServiceError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| AuthServiceError::Internal(anyhow::anyhow!("bad timestamp {ms}")))
}

impl ChallengeStore for RedisChallengeStore {
    async fn replace(&self, challenge: &Challenge) -> Result<(), AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let ttl_ms = (challenge.expires_at - challenge.created_at).num_milliseconds() + KEY_GRACE_MS;
        let _: i64 = Script::new(REPLACE_SCRIPT)
            .key(challenge_key(&challenge.email))
            .arg(&challenge.code)
            .arg(challenge.created_at.timestamp_millis())
            .arg(challenge.expires_at.timestamp_millis())
            .arg(ttl_ms.max(1))
            .invoke_async(&mut conn)
            .await
            .context("replace challenge")?;
        Ok(())
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Challenge>, AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let row: Option<(String, i64, i64, u32)> = Script::new(CONSUME_SCRIPT)
            .key(challenge_key(email))
            .arg(code)
            .arg(now.timestamp_millis())
            .arg(self.max_attempts)
            .invoke_async(&mut conn)
            .await
            .context("consume challenge")?;

        let Some((code, created_at, expires_at, attempts)) = row else {
            return Ok(None);
        };
        Ok(Some(Challenge {
            email: email.to_owned(),
            code,
            created_at: from_millis(created_at)?,
            expires_at: from_millis(expires_at)?,
            attempts,
        }))
    }

    /// Redis drops keys past their PEXPIRE on its own.
    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, AuthServiceError> {
        Ok(0)
    }
}
