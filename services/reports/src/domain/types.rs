use chrono::{DateTime, Utc};
use serde::Serialize;

use lori_domain::id::{ReportId, UserId, VehicleId};
use lori_domain::report::ReportFrequency;

/// A recurring report as stored. Due when `next_report_date <= now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReport {
    pub id: ReportId,
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub frequency: ReportFrequency,
    pub next_report_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub registration_horse: String,
    pub registration_trailer: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LastLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Everything a report email is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub vehicle: Vehicle,
    pub recipient: Recipient,
    pub last_location: Option<LastLocation>,
    pub next_service_date: Option<DateTime<Utc>>,
}

/// What happened to one due report during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Delivered and rescheduled.
    Sent { next_report_date: DateTime<Utc> },
    /// Vehicle or recipient could not be resolved. Still due.
    LookupFailed { reason: String },
    /// Gateway refused the message. Still due.
    DispatchFailed { reason: String },
    /// Delivered, but the new due date was not saved. Still due.
    PersistFailed { reason: String },
}

impl ReportOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent { .. } => "sent",
            Self::LookupFailed { .. } => "lookup_failed",
            Self::DispatchFailed { .. } => "dispatch_failed",
            Self::PersistFailed { .. } => "persist_failed",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingReport {
    pub report_id: ReportId,
    pub outcome: ReportOutcome,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickReport {
    /// Another tick held the guard; nothing was read or sent.
    Skipped,
    Completed(Vec<ProcessingReport>),
}

/// Counts from the most recent finished tick, exposed on `/readyz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    #[serde(serialize_with = "lori_core::serde::to_rfc3339_ms")]
    pub finished_at: DateTime<Utc>,
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
}

impl TickSummary {
    pub fn from_reports(finished_at: DateTime<Utc>, reports: &[ProcessingReport]) -> Self {
        let sent = reports.iter().filter(|r| r.outcome.is_sent()).count();
        Self {
            finished_at,
            due: reports.len(),
            sent,
            failed: reports.len() - sent,
        }
    }
}
