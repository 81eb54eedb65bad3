use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::observability::RequestSpan;
use super::pages::render_page;
use super::validation::validate_credentials;
use super::{ApiError, AppState, flash};
use crate::db::User;
use crate::services::AuthError;
use crate::views::Template;

/// Session key holding the authenticated user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Identity attached to every request by [`identity_middleware`].
/// `None` means the viewer is anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the session's user id to a user record and attaches it as a
/// [`CurrentUser`] extension, on the request for handlers and on the response
/// for the error-page layer. A stale id (row gone) leaves the viewer
/// anonymous.
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = match session.get::<i32>(USER_ID_KEY).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Unreadable session, treating as anonymous: {e}");
            None
        }
    };

    let user = match user_id {
        Some(id) => state.auth_service().resolve_user(id).await?,
        None => None,
    };

    if let (Some(user), Some(span)) = (&user, request.extensions().get::<RequestSpan>()) {
        span.record_user(user.id);
    }

    let current = CurrentUser(user);
    request.extensions_mut().insert(current.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(current);
    Ok(response)
}

/// Rejects requests without an authenticated identity with 401.
pub async fn require_login(
    Extension(current): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !current.is_authenticated() {
        return Err(ApiError::unauthorized(format!(
            "{} requires login",
            request.uri().path()
        )));
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
) -> Result<Response, ApiError> {
    Ok(render_page(&state, &session, &current, Template::Login)
        .await?
        .into_response())
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiError> {
    if let Err(message) = validate_credentials(&form.username, &form.password) {
        flash::push(&session, message).await?;
        return Ok(Redirect::to("/login"));
    }

    match state
        .auth_service()
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(USER_ID_KEY, user.id).await?;
            tracing::info!(user_id = user.id, "Login succeeded");
            flash::push(&session, "Login success.").await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            flash::push(&session, AuthError::InvalidCredentials.to_string()).await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, ApiError> {
    session.remove::<i32>(USER_ID_KEY).await?;
    session.cycle_id().await?;
    flash::push(&session, "Goodbye.").await?;
    Ok(Redirect::to("/"))
}
