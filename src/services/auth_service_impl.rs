//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        self.store
            .verify_admin_credentials(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn resolve_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn admin(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_admin().await?)
    }

    async fn update_display_name(&self, user_id: i32, name: &str) -> Result<(), AuthError> {
        if self.store.update_user_name(user_id, name).await? {
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}
