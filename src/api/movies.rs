use axum::{
    Extension, Form,
    extract::{Path, State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::CurrentUser;
use super::pages::render_page;
use super::validation::{parse_movie_id, validate_movie};
use super::{ApiError, AppState, flash};
use crate::views::Template;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
}

/// GET /
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
) -> Result<Response, ApiError> {
    let movies = state.movie_service().list().await?;

    Ok(
        render_page(&state, &session, &current, Template::Index { movies: &movies })
            .await?
            .into_response(),
    )
}

/// POST /
///
/// Anonymous submissions are dropped with a plain redirect, unlike the other
/// write routes which answer 401. The body is only looked at once the viewer
/// is known to be logged in; an unreadable body counts as invalid input.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
    form: Result<Form<MovieForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    if !current.is_authenticated() {
        return Ok(Redirect::to("/"));
    }

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable movie form: {rejection}");
            MovieForm::default()
        }
    };

    if let Err(message) = validate_movie(&form.title, &form.year) {
        flash::push(&session, message).await?;
        return Ok(Redirect::to("/"));
    }

    state
        .movie_service()
        .create(&form.title, &form.year)
        .await?;

    flash::push(&session, "Item created.").await?;
    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_movie_page(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_movie_id(&raw_id)?;
    let movie = state.movie_service().get(id).await?;

    Ok(
        render_page(&state, &session, &current, Template::Edit { movie: &movie })
            .await?
            .into_response(),
    )
}

/// POST /movie/edit/{id}
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, ApiError> {
    let id = parse_movie_id(&raw_id)?;
    // Resolve first so a missing id is a 404 even for invalid input
    state.movie_service().get(id).await?;

    if let Err(message) = validate_movie(&form.title, &form.year) {
        flash::push(&session, message).await?;
        return Ok(Redirect::to(&format!("/movie/edit/{id}")));
    }

    state
        .movie_service()
        .update(id, &form.title, &form.year)
        .await?;

    flash::push(&session, "Item updated.").await?;
    Ok(Redirect::to("/"))
}

/// POST /movie/delete/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = parse_movie_id(&raw_id)?;
    state.movie_service().delete(id).await?;

    flash::push(&session, "Item deleted.").await?;
    Ok(Redirect::to("/"))
}
