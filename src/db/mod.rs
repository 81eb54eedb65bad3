use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::{GeneralConfig, SecurityConfig};

pub mod migrator;
pub mod repositories;

pub use repositories::movie::Movie;
pub use repositories::user::{AdminProvision, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Opens the configured database with the configured pool bounds.
    pub async fn connect(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Rolls back every migration, dropping all tables, then re-applies them.
    pub async fn recreate_schema(&self) -> Result<()> {
        migrator::Migrator::down(&self.conn, None).await?;
        migrator::Migrator::up(&self.conn, None).await?;
        info!("Database schema dropped and recreated");
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_admin(&self) -> Result<Option<User>> {
        self.user_repo().get_admin().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_admin_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_admin_credentials(username, password)
            .await
    }

    pub async fn update_user_name(&self, id: i32, name: &str) -> Result<bool> {
        self.user_repo().update_name(id, name).await
    }

    pub async fn set_admin_name(&self, name: &str) -> Result<AdminProvision> {
        self.user_repo().set_admin_name(name).await
    }

    pub async fn upsert_admin(
        &self,
        username: &str,
        password: &str,
        default_name: &str,
        config: &SecurityConfig,
    ) -> Result<AdminProvision> {
        self.user_repo()
            .upsert_admin(username, password, default_name, config)
            .await
    }

    // ========================================================================
    // Movies
    // ========================================================================

    pub async fn add_movie(&self, title: &str, year: &str) -> Result<i32> {
        self.movie_repo().add(title, year).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list_all().await
    }

    pub async fn update_movie(&self, id: i32, title: &str, year: &str) -> Result<bool> {
        self.movie_repo().update(id, title, year).await
    }

    pub async fn remove_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().remove(id).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }
}
