use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService};

/// Process-wide handles shared by the web server and the CLI commands.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub movie_service: Arc<dyn MovieService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::connect(&config.general).await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone())) as Arc<dyn AuthService>;
        let movie_service =
            Arc::new(SeaOrmMovieService::new(store.clone())) as Arc<dyn MovieService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            movie_service,
        }
    }
}
