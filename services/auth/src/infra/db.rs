use anyhow::Context as _;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use lori_auth_schema::users;

use crate::domain::repository::CredentialStore;
use crate::domain::types::AuthUser;
use crate::error::AuthServiceError;
use crate::infra::password;

#[derive(Clone)]
pub struct DbCredentialStore {
    pub db: DatabaseConnection,
}

impl DbCredentialStore {
    async fn find_model(&self, email: &str) -> Result<Option<users::Model>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model)
    }
}

impl CredentialStore for DbCredentialStore {
    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = self.find_model(email).await?;
        let password = password.to_owned();

        // Argon2 is CPU-bound; keep it off the reactor.
        match model {
            Some(model) => {
                let user_id = model.id;
                let hash = model.password_hash.clone();
                let matches = tokio::task::spawn_blocking(move || {
                    password::verify_stored(user_id, &password, &hash)
                })
                .await
                .context("join password verification")?;
                Ok(matches.then(|| user_from_model(model)))
            }
            None => {
                tokio::task::spawn_blocking(move || password::verify_dummy(&password))
                    .await
                    .context("join password verification")?;
                Ok(None)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        Ok(self.find_model(email).await?.map(user_from_model))
    }
}

fn user_from_model(m: users::Model) -> AuthUser {
    AuthUser {
        id: m.id,
        email: m.email,
        name: m.name,
    }
}

/// `SELECT 1` round trip for readiness.
pub async fn ping(db: &DatabaseConnection) -> bool {
    db.ping().await.is_ok()
}
