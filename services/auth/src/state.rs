use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use lori_auth_types::bearer::SessionSecret;
use lori_core::clock::SystemClock;
use lori_notify::Mailer;

use crate::infra::ChallengeBackend;
use crate::infra::db::DbCredentialStore;
use crate::usecase::session::{AuthSessionManager, SessionSettings};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub challenges: ChallengeBackend,
    pub mailer: Mailer,
    pub settings: SessionSettings,
}

impl AppState {
    pub fn credential_store(&self) -> DbCredentialStore {
        DbCredentialStore {
            db: self.db.clone(),
        }
    }

    pub fn session_manager(
        &self,
    ) -> AuthSessionManager<DbCredentialStore, ChallengeBackend, Mailer, SystemClock> {
        AuthSessionManager {
            credentials: self.credential_store(),
            challenges: self.challenges.clone(),
            notifier: self.mailer.clone(),
            clock: SystemClock,
            settings: self.settings.clone(),
        }
    }
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        SessionSecret(state.settings.session_secret.clone())
    }
}
