use crate::usecase::tick::DEFAULT_DISPATCH_CONCURRENCY;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reports service configuration loaded from environment variables.
/// Mail settings are read separately by `lori_notify::MailConfig`.
#[derive(Debug)]
pub struct ReportsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Seconds between ticks (default 86400). Env var: `REPORT_TICK_INTERVAL_SECS`.
    pub tick_interval_secs: u64,
    /// Tick once at startup (default true). Env var: `REPORT_TICK_ON_START`.
    pub tick_on_start: bool,
    /// Reports dispatched at once (default 8). Env var: `REPORT_DISPATCH_CONCURRENCY`.
    pub dispatch_concurrency: usize,
    /// TCP port to listen on (default 3114). Env var: `REPORTS_PORT`.
    pub reports_port: u16,
}

impl ReportsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            tick_interval_secs: env_or("REPORT_TICK_INTERVAL_SECS", 86_400u64).max(1),
            tick_on_start: env_or("REPORT_TICK_ON_START", true),
            dispatch_concurrency: env_or("REPORT_DISPATCH_CONCURRENCY", DEFAULT_DISPATCH_CONCURRENCY)
                .max(1),
            reports_port: env_or("REPORTS_PORT", 3114),
        }
    }
}
