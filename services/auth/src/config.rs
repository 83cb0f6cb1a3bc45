use crate::domain::types::{
    DEFAULT_CHALLENGE_CAPACITY, DEFAULT_OTP_MAX_ATTEMPTS, DEFAULT_OTP_TTL_SECS,
    DEFAULT_SESSION_TTL_SECS,
};

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Auth service configuration loaded from environment variables.
/// Mail settings are read separately by `lori_notify::MailConfig`.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL. Unset keeps challenges in process memory.
    pub redis_url: Option<String>,
    /// HMAC secret for signing session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// One-time code lifetime (default 300). Env var: `OTP_TTL_SECS`.
    pub otp_ttl_secs: i64,
    /// Session token lifetime (default 3600). Env var: `SESSION_TTL_SECS`.
    pub session_ttl_secs: i64,
    /// Wrong codes allowed per challenge (default 5). Env var: `OTP_MAX_ATTEMPTS`.
    pub otp_max_attempts: u32,
    /// In-memory store bound (default 10000). Env var: `OTP_STORE_CAPACITY`.
    pub otp_store_capacity: usize,
    /// Expired-challenge sweep period (default 60). Env var: `OTP_SWEEP_INTERVAL_SECS`.
    pub otp_sweep_interval_secs: u64,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    pub auth_port: u16,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            otp_ttl_secs: env_or("OTP_TTL_SECS", DEFAULT_OTP_TTL_SECS),
            session_ttl_secs: env_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
            otp_max_attempts: env_or("OTP_MAX_ATTEMPTS", DEFAULT_OTP_MAX_ATTEMPTS).max(1),
            otp_store_capacity: env_or("OTP_STORE_CAPACITY", DEFAULT_CHALLENGE_CAPACITY).max(1),
            otp_sweep_interval_secs: env_or("OTP_SWEEP_INTERVAL_SECS", 60u64).max(1),
            auth_port: env_or("AUTH_PORT", 3112),
        }
    }
}
