use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::error::ErrorPage;
use super::{ApiError, AppState, flash};
use crate::views::{self, PageContext, Template};

/// Builds the values every template receives: the configured admin (whoever
/// is viewing), the viewer's login state and any pending flash messages.
pub async fn page_context(
    state: &AppState,
    session: &Session,
    current: &CurrentUser,
) -> Result<PageContext, ApiError> {
    let admin = state.auth_service().admin().await?;
    let flashes = flash::take(session).await?;

    Ok(PageContext {
        admin,
        authenticated: current.is_authenticated(),
        flashes,
    })
}

pub async fn render_page(
    state: &AppState,
    session: &Session,
    current: &CurrentUser,
    template: Template<'_>,
) -> Result<Html<String>, ApiError> {
    let ctx = page_context(state, session, current).await?;
    Ok(Html(views::render(template, &ctx)))
}

/// Replaces the body of responses tagged with an [`ErrorPage`] by the
/// rendered page, keeping the status code. Sits outside the identity layer so
/// a failed session lookup still gets a page; the viewer is read back from
/// the response and is anonymous when identity never resolved.
pub async fn error_pages(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().copied() else {
        return response;
    };
    let current = response
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .unwrap_or_default();

    let template = match page {
        ErrorPage::NotFound => Template::NotFound,
        ErrorPage::LoginRequired => Template::LoginRequired,
        ErrorPage::ServerError => Template::ServerError,
    };

    let ctx = match page_context(&state, &session, &current).await {
        Ok(ctx) => ctx,
        Err(e) => {
            // The store may be what failed; render without injected context
            tracing::warn!("Rendering {} without page context: {}", template.name(), e);
            PageContext {
                authenticated: current.is_authenticated(),
                ..PageContext::default()
            }
        }
    };

    (response.status(), Html(views::render(template, &ctx))).into_response()
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("No route matched".to_string())
}
