use crate::entities::{movies, prelude::*};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::info;

/// Repository for movie catalog operations
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: movies::Model) -> Movie {
        Movie {
            id: m.id,
            title: m.title,
            year: m.year,
        }
    }

    pub async fn add(&self, title: &str, year: &str) -> Result<i32> {
        let active_model = movies::ActiveModel {
            title: Set(title.to_string()),
            year: Set(year.to_string()),
            ..Default::default()
        };

        let res = Movies::insert(active_model).exec(&self.conn).await?;
        info!("Added movie {}: {} ({})", res.last_insert_id, title, year);
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let result = Movies::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Self::map_model))
    }

    /// All movies in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn update(&self, id: i32, title: &str, year: &str) -> Result<bool> {
        let Some(movie) = Movies::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: movies::ActiveModel = movie.into();
        active.title = Set(title.to_string());
        active.year = Set(year.to_string());
        active.update(&self.conn).await?;

        info!("Updated movie {}: {} ({})", id, title, year);
        Ok(true)
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            info!("Deleted movie {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Movies::find().count(&self.conn).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
}
