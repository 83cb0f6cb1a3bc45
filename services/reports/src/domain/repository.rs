#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use lori_domain::id::ReportId;

use crate::domain::types::{ReportContext, ScheduledReport};
use crate::error::ReportsError;

/// Port over scheduled reports and the fleet data they describe.
pub trait ReportStore: Send + Sync {
    /// Every report with `next_report_date <= now`, oldest due first.
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledReport>, ReportsError>;

    /// Resolve the vehicle and recipient of `report` plus optional fleet extras.
    ///
    /// A missing vehicle or user is an error, not `None`.
    async fn load_context(&self, report: &ScheduledReport) -> Result<ReportContext, ReportsError>;

    /// Move `id` to its next due date. `now` becomes `updated_at`.
    async fn set_next_report_date(
        &self,
        id: ReportId,
        next: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ReportsError>;
}
