use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::{prelude::*, users};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
        }
    }
}

/// Outcome of provisioning the admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminProvision {
    Created,
    Updated,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn admin_model(&self) -> Result<Option<users::Model>> {
        Users::find()
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query admin user")
    }

    /// The admin is the user row with the lowest id; any later rows are ignored.
    pub async fn get_admin(&self) -> Result<Option<User>> {
        Ok(self.admin_model().await?.map(User::from))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Checks `username` and `password` against the admin row.
    /// Returns the admin on success and `None` for any mismatch, including a
    /// missing admin or one that was never given credentials.
    ///
    /// Argon2 verification is CPU-bound, so it runs on the blocking pool.
    pub async fn verify_admin_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let Some(admin) = self.admin_model().await? else {
            return Ok(None);
        };

        let (Some(stored_username), Some(password_hash)) =
            (admin.username.as_deref(), admin.password_hash.clone())
        else {
            return Ok(None);
        };

        if stored_username != username {
            return Ok(None);
        }

        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(admin)))
    }

    pub async fn update_name(&self, id: i32, name: &str) -> Result<bool> {
        let Some(user) = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for name update")?
        else {
            return Ok(false);
        };

        let mut active: users::ActiveModel = user.into();
        active.name = Set(name.to_string());
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Sets the admin display name, creating the admin row if none exists.
    pub async fn set_admin_name(&self, name: &str) -> Result<AdminProvision> {
        if let Some(admin) = self.admin_model().await? {
            let mut active: users::ActiveModel = admin.into();
            active.name = Set(name.to_string());
            active.update(&self.conn).await?;
            return Ok(AdminProvision::Updated);
        }

        let active = users::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        Users::insert(active).exec(&self.conn).await?;
        Ok(AdminProvision::Created)
    }

    /// Creates the admin with `default_name`, or updates the existing admin's
    /// credentials in place (its display name is kept).
    pub async fn upsert_admin(
        &self,
        username: &str,
        password: &str,
        default_name: &str,
        config: &SecurityConfig,
    ) -> Result<AdminProvision> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        if let Some(admin) = self.admin_model().await? {
            let mut active: users::ActiveModel = admin.into();
            active.username = Set(Some(username.to_string()));
            active.password_hash = Set(Some(password_hash));
            active.update(&self.conn).await?;
            return Ok(AdminProvision::Updated);
        }

        let active = users::ActiveModel {
            name: Set(default_name.to_string()),
            username: Set(Some(username.to_string())),
            password_hash: Set(Some(password_hash)),
            ..Default::default()
        };
        Users::insert(active).exec(&self.conn).await?;
        Ok(AdminProvision::Created)
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the library default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
