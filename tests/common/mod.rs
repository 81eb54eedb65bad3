#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use watchlist::api::AppState;
use watchlist::config::{Config, SecurityConfig};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Drives the router and keeps the session cookie between requests, like a
/// browser would. The database lives in a temp dir removed on drop.
pub struct TestClient {
    pub state: Arc<AppState>,
    app: Router,
    cookie: Option<String>,
    _db_dir: TempDir,
}

pub async fn spawn_app() -> TestClient {
    let db_dir = TempDir::new().expect("failed to create temp dir");
    let db_path = db_dir.path().join("watchlist.db");

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };

    let state = watchlist::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    state
        .store()
        .upsert_admin(
            ADMIN_USERNAME,
            ADMIN_PASSWORD,
            "Admin",
            &state.config().security,
        )
        .await
        .expect("failed to provision admin");

    let app = watchlist::api::router(state.clone());

    TestClient {
        state,
        app,
        cookie: None,
        _db_dir: db_dir,
    }
}

impl TestClient {
    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(cookie) = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("id="))
        {
            self.cookie = cookie.split(';').next().map(str::to_string);
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            location,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri), Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    /// POST with an arbitrary body and, optionally, no content type at all.
    pub async fn post_raw(
        &mut self,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> TestResponse {
        let builder = Request::builder().method("POST").uri(uri);
        let builder = match content_type {
            Some(ct) => builder.header(header::CONTENT_TYPE, ct),
            None => builder,
        };

        self.send(builder, Body::from(body.to_string())).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    pub async fn login_as_admin(&mut self) {
        let response = self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/"));
    }

    /// Runs raw SQL against the app's database.
    pub async fn execute(&self, sql: &str) {
        use sea_orm::ConnectionTrait;
        self.state
            .store()
            .conn
            .execute_unprepared(sql)
            .await
            .expect("failed to execute sql");
    }

    pub async fn movie_count(&self) -> u64 {
        self.state.store().count_movies().await.unwrap()
    }
}
