use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use tracing::warn;

use lori_domain::id::{ReportId, UserId, VehicleId};
use lori_reports_schema::{
    scheduled_reports, users, vehicle_locations, vehicle_maintenance, vehicles,
};

use crate::domain::repository::ReportStore;
use crate::domain::types::{LastLocation, Recipient, ReportContext, ScheduledReport, Vehicle};
use crate::error::ReportsError;

#[derive(Clone)]
pub struct DbReportStore {
    pub db: DatabaseConnection,
}

impl ReportStore for DbReportStore {
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledReport>, ReportsError> {
        let models = scheduled_reports::Entity::find()
            .filter(scheduled_reports::Column::NextReportDate.lte(now))
            .order_by_asc(scheduled_reports::Column::NextReportDate)
            .all(&self.db)
            .await
            .context("find due scheduled reports")?;

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let id = m.id;
                report_from_model(m)
                    .map_err(|e| warn!(report_id = %id, error = %e, "skipping unreadable report"))
                    .ok()
            })
            .collect())
    }

    async fn load_context(&self, report: &ScheduledReport) -> Result<ReportContext, ReportsError> {
        let vehicle = vehicles::Entity::find_by_id(report.vehicle_id.0)
            .one(&self.db)
            .await
            .context("find vehicle")?
            .ok_or(ReportsError::VehicleNotFound(report.vehicle_id))?;

        let recipient = users::Entity::find_by_id(report.user_id.0)
            .one(&self.db)
            .await
            .context("find report recipient")?
            .ok_or(ReportsError::RecipientNotFound(report.user_id))?;

        let last_location = vehicle_locations::Entity::find()
            .filter(vehicle_locations::Column::VehicleId.eq(vehicle.id))
            .order_by_desc(vehicle_locations::Column::RecordedAt)
            .one(&self.db)
            .await
            .context("find latest vehicle location")?;

        let next_service = vehicle_maintenance::Entity::find()
            .filter(vehicle_maintenance::Column::VehicleId.eq(vehicle.id))
            .filter(vehicle_maintenance::Column::NextServiceDate.is_not_null())
            .order_by_desc(vehicle_maintenance::Column::PerformedAt)
            .one(&self.db)
            .await
            .context("find latest maintenance record")?;

        Ok(ReportContext {
            vehicle: vehicle_from_model(vehicle),
            recipient: Recipient {
                id: UserId(recipient.id),
                email: recipient.email,
                name: recipient.name,
            },
            last_location: last_location.map(|l| LastLocation {
                latitude: l.latitude,
                longitude: l.longitude,
                recorded_at: l.recorded_at,
            }),
            next_service_date: next_service.and_then(|m| m.next_service_date),
        })
    }

    async fn set_next_report_date(
        &self,
        id: ReportId,
        next: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ReportsError> {
        scheduled_reports::ActiveModel {
            id: Set(id.0),
            next_report_date: Set(next),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update next report date")?;
        Ok(())
    }
}

fn report_from_model(m: scheduled_reports::Model) -> anyhow::Result<ScheduledReport> {
    Ok(ScheduledReport {
        id: ReportId(m.id),
        user_id: UserId(m.user_id),
        vehicle_id: VehicleId(m.vehicle_id),
        frequency: m.frequency.parse()?,
        next_report_date: m.next_report_date,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn vehicle_from_model(m: vehicles::Model) -> Vehicle {
    Vehicle {
        id: VehicleId(m.id),
        make: m.make,
        model: m.model,
        registration_horse: m.registration_horse,
        registration_trailer: m.registration_trailer,
        status: m.status,
    }
}

/// `SELECT 1` round trip for readiness.
pub async fn ping(db: &DatabaseConnection) -> bool {
    db.ping().await.is_ok()
}
