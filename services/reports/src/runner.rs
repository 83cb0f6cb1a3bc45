use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info};

use lori_core::clock::Clock;
use lori_notify::NotificationGateway;

use crate::domain::repository::ReportStore;
use crate::domain::types::{TickReport, TickSummary};
use crate::usecase::tick::RecurringScheduler;

/// Drives [`RecurringScheduler::tick`] on a fixed period.
pub struct TriggerLoop<R, N, K>
where
    R: ReportStore,
    N: NotificationGateway,
    K: Clock,
{
    pub scheduler: Arc<RecurringScheduler<R, N>>,
    pub clock: K,
    pub period: Duration,
    /// Tick once right away instead of waiting a full period.
    pub tick_on_start: bool,
    /// Receives a summary after each completed tick.
    pub status: watch::Sender<Option<TickSummary>>,
}

impl<R, N, K> TriggerLoop<R, N, K>
where
    R: ReportStore,
    N: NotificationGateway,
    K: Clock,
{
    /// Run until `shutdown` turns true. An in-flight tick always finishes first.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            period_secs = self.period.as_secs(),
            tick_on_start = self.tick_on_start,
            "report trigger loop started"
        );

        let start = if self.tick_on_start {
            Instant::now()
        } else {
            Instant::now() + self.period
        };
        let mut interval = tokio::time::interval_at(start, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => self.fire().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("report trigger loop shutting down");
                        break;
                    }
                }
            }
        }
    }

    async fn fire(&self) {
        let now = self.clock.now();
        match self.scheduler.tick(now).await {
            Ok(TickReport::Completed(reports)) => {
                let summary = TickSummary::from_reports(self.clock.now(), &reports);
                self.status.send_replace(Some(summary));
            }
            Ok(TickReport::Skipped) => {}
            Err(e) => error!(kind = e.kind(), error = %e.detail(), "report tick failed"),
        }
    }
}
