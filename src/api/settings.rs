use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::pages::render_page;
use super::validation::validate_display_name;
use super::{ApiError, AppState, flash};
use crate::views::Template;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub name: String,
}

fn session_user(current: &CurrentUser) -> Result<&crate::db::User, ApiError> {
    current
        .user()
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
}

/// GET /settings
pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
) -> Result<Response, ApiError> {
    let name = session_user(&current)?.name.clone();

    Ok(
        render_page(&state, &session, &current, Template::Settings { name: &name })
            .await?
            .into_response(),
    )
}

/// POST /settings
///
/// Renames the logged-in user. Concurrent updates are last-writer-wins.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, ApiError> {
    let user = session_user(&current)?;

    if let Err(message) = validate_display_name(&form.name) {
        flash::push(&session, message).await?;
        return Ok(Redirect::to("/settings"));
    }

    state
        .auth_service()
        .update_display_name(user.id, &form.name)
        .await?;

    tracing::info!(user_id = user.id, "Display name updated");
    flash::push(&session, "Settings updated.").await?;
    Ok(Redirect::to("/"))
}
