//! Domain service for the single administrator account.
//!
//! Handles credential checks, session identity restoration and the display
//! name shown on every page.

use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Covers unknown usernames, wrong passwords and an unprovisioned admin
    /// alike, so callers cannot tell them apart.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials against the admin row and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails for any reason
    /// related to the supplied credentials.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves a session's user id. A missing row is `Ok(None)`, not an error.
    async fn resolve_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// The sole configured administrator, if provisioned.
    async fn admin(&self) -> Result<Option<User>, AuthError>;

    /// Changes the display name of the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] if the row vanished.
    async fn update_display_name(&self, user_id: i32, name: &str) -> Result<(), AuthError>;
}
