use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::services::{AuthService, MovieService};
use crate::state::SharedState;

mod assets;
pub mod auth;
mod error;
pub mod flash;
mod movies;
mod observability;
pub mod pages;
mod settings;
pub mod validation;

pub use auth::CurrentUser;
pub use error::{ApiError, ErrorPage};

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    /// Signs the session cookie.
    pub session_key: Key,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }
}

/// Derives the cookie signing key from `server.session_secret`, or generates a
/// random one when the secret is empty.
pub fn session_key(config: &Config) -> anyhow::Result<Key> {
    let secret = config.server.session_secret.as_bytes();
    if secret.is_empty() {
        tracing::warn!("No session secret configured, sessions will not survive a restart");
        return Ok(Key::generate());
    }

    Key::try_from(secret).map_err(|e| anyhow::anyhow!("Invalid session secret: {e}"))
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let session_key = session_key(&shared.config)?;

    Ok(Arc::new(AppState {
        shared,
        session_key,
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle)
}

pub fn router(state: Arc<AppState>) -> Router {
    let (secure_cookies, idle_minutes) = {
        let config = state.config();
        (
            config.server.secure_cookies,
            config.server.session_idle_minutes,
        )
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(idle_minutes)))
        .with_signed(state.session_key.clone());

    let mut app = Router::new()
        .merge(create_protected_router())
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/static/{*path}", get(assets::serve_asset));

    if state.prometheus_handle.is_some() {
        app = app.route("/metrics", get(observability::get_metrics));
    }

    app.fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::identity_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            pages::error_pages,
        ))
        .layer(session_layer)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state)
}

/// Routes that answer 401 before any handler logic runs when the viewer is
/// anonymous.
fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_movie_page).post(movies::update_movie),
        )
        .route("/movie/delete/{id}", post(movies::delete_movie))
        .route("/logout", get(auth::logout))
        .route(
            "/settings",
            get(settings::settings_page).post(settings::update_settings),
        )
        .route_layer(middleware::from_fn(auth::require_login))
}
