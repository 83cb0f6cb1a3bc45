use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use lori_notify::NotificationGateway;

use crate::domain::payload::build_report_email;
use crate::domain::repository::ReportStore;
use crate::domain::schedule::next_report_date;
use crate::domain::types::{ProcessingReport, ReportOutcome, ScheduledReport, TickReport};
use crate::error::ReportsError;

pub const DEFAULT_DISPATCH_CONCURRENCY: usize = 8;

/// Sends every due report and moves it to its next due date.
///
/// ```text
/// tick(now): try_lock ─▶ find_due ─▶ ┬─ load ─▶ send ─▶ next date ─▶ persist
///                                     ├─ ...   (at most `concurrency` at once)
///                                     └─ ...
/// ```
///
/// Delivery is at-least-once: a report is only rescheduled after its email
/// went out, so a failed persist resends it on the next tick.
///
/// The overlap guard lives in this process only. Deploy the reports service
/// as a single replica; two schedulers over one database would both send
/// every due report.
pub struct RecurringScheduler<R, N>
where
    R: ReportStore,
    N: NotificationGateway,
{
    pub store: R,
    pub notifier: N,
    concurrency: usize,
    in_flight: Mutex<()>,
}

impl<R, N> RecurringScheduler<R, N>
where
    R: ReportStore,
    N: NotificationGateway,
{
    pub fn new(store: R, notifier: N, concurrency: usize) -> Self {
        Self {
            store,
            notifier,
            concurrency: concurrency.max(1),
            in_flight: Mutex::new(()),
        }
    }

    /// Process all reports due at `now`.
    ///
    /// Returns [`TickReport::Skipped`] without touching the store when another
    /// tick is still running. Per-report failures are outcomes, not errors;
    /// only failing to read the due set fails the tick.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<TickReport, ReportsError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!("previous tick still running; skipping");
            return Ok(TickReport::Skipped);
        };

        let due = self.store.find_due(now).await?;
        info!(due = due.len(), %now, "tick started");

        let reports: Vec<ProcessingReport> = futures::stream::iter(due)
            .map(|report| self.process(report, now))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let sent = reports.iter().filter(|r| r.outcome.is_sent()).count();
        info!(due = reports.len(), sent, failed = reports.len() - sent, "tick finished");
        Ok(TickReport::Completed(reports))
    }

    async fn process(&self, report: ScheduledReport, now: DateTime<Utc>) -> ProcessingReport {
        let outcome = self.deliver(&report, now).await;
        match &outcome {
            ReportOutcome::Sent { next_report_date } => info!(
                report_id = %report.id,
                outcome = outcome.as_str(),
                %next_report_date,
                "report processed"
            ),
            ReportOutcome::LookupFailed { reason }
            | ReportOutcome::DispatchFailed { reason }
            | ReportOutcome::PersistFailed { reason } => warn!(
                report_id = %report.id,
                outcome = outcome.as_str(),
                reason = %reason,
                "report not processed"
            ),
        }
        ProcessingReport {
            report_id: report.id,
            outcome,
        }
    }

    async fn deliver(&self, report: &ScheduledReport, now: DateTime<Utc>) -> ReportOutcome {
        let ctx = match self.store.load_context(report).await {
            Ok(ctx) => ctx,
            Err(e) => return ReportOutcome::LookupFailed { reason: e.detail() },
        };

        let message = build_report_email(report, &ctx);
        if let Err(e) = self.notifier.send(&message).await {
            return ReportOutcome::DispatchFailed {
                reason: e.to_string(),
            };
        }

        let Some(next) = next_report_date(report.frequency, now) else {
            return ReportOutcome::PersistFailed {
                reason: ReportsError::ScheduleOverflow.detail(),
            };
        };
        match self.store.set_next_report_date(report.id, next, now).await {
            Ok(()) => ReportOutcome::Sent {
                next_report_date: next,
            },
            Err(e) => ReportOutcome::PersistFailed { reason: e.detail() },
        }
    }
}
