use lori_domain::id::{UserId, VehicleId};

/// Reports service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ReportsError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),
    #[error("recipient {0} not found")]
    RecipientNotFound(UserId),
    #[error("next report date out of range")]
    ScheduleOverflow,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ReportsError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VehicleNotFound(_) => "VEHICLE_NOT_FOUND",
            Self::RecipientNotFound(_) => "RECIPIENT_NOT_FOUND",
            Self::ScheduleOverflow => "SCHEDULE_OVERFLOW",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Message with the anyhow chain for `Internal`, for item outcomes and logs.
    pub fn detail(&self) -> String {
        match self {
            Self::Internal(e) => format!("{e:#}"),
            other => other.to_string(),
        }
    }
}
