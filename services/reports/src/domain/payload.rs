use lori_core::serde::format_rfc3339_ms;
use lori_notify::EmailMessage;

use crate::domain::types::{ReportContext, ScheduledReport};

pub const REPORT_SUBJECT: &str = "Scheduled Vehicle Report";

const NOT_AVAILABLE: &str = "N/A";

/// Render the report email for `report` from its resolved context.
pub fn build_report_email(report: &ScheduledReport, ctx: &ReportContext) -> EmailMessage {
    let vehicle = &ctx.vehicle;
    let last_location = ctx
        .last_location
        .as_ref()
        .map(|l| {
            format!(
                "{:.5}, {:.5} (at {})",
                l.latitude,
                l.longitude,
                format_rfc3339_ms(&l.recorded_at)
            )
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let next_service = ctx
        .next_service_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());

    let text = format!(
        "Hi {name},\n\n\
         {frequency} Scheduled Report for Vehicle {id} ({make} {model}, {horse} / {trailer}):\n\
         - Status: {status}\n\
         - Last Location: {last_location}\n\
         - Next Service Date: {next_service}\n\n\
         The Lori Logistics Team",
        name = ctx.recipient.name,
        frequency = report.frequency,
        id = vehicle.id,
        make = vehicle.make,
        model = vehicle.model,
        horse = vehicle.registration_horse,
        trailer = vehicle.registration_trailer,
        status = vehicle.status,
    );

    EmailMessage {
        to: ctx.recipient.email.clone(),
        subject: REPORT_SUBJECT.to_owned(),
        text,
    }
}
