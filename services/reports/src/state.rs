use sea_orm::DatabaseConnection;
use tokio::sync::watch;

use crate::domain::types::TickSummary;
use crate::infra::db::DbReportStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub last_tick: watch::Receiver<Option<TickSummary>>,
}

impl AppState {
    pub fn report_store(&self) -> DbReportStore {
        DbReportStore {
            db: self.db.clone(),
        }
    }
}
