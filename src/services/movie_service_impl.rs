//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::{Movie, Store};
use crate::services::movie_service::{MovieError, MovieService};
use async_trait::async_trait;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn create(&self, title: &str, year: &str) -> Result<Movie, MovieError> {
        let id = self.store.add_movie(title, year).await?;
        Ok(Movie {
            id,
            title: title.to_string(),
            year: year.to_string(),
        })
    }

    async fn update(&self, id: i32, title: &str, year: &str) -> Result<(), MovieError> {
        if self.store.update_movie(id, title, year).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(id))
        }
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if self.store.remove_movie(id).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(id))
        }
    }
}
