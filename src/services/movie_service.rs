//! Domain service for the movie catalog.

use thiserror::Error;

use crate::db::Movie;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for movie CRUD. Inputs are expected to be validated
/// by the caller.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies in insertion order.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] for an unknown id.
    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// Inserts a new row; identical titles are allowed.
    async fn create(&self, title: &str, year: &str) -> Result<Movie, MovieError>;

    async fn update(&self, id: i32, title: &str, year: &str) -> Result<(), MovieError>;

    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
