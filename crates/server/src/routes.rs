// FILE: crates/server/src/routes.rs

use crate::error::WebResult;
use crate::render;
use crate::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use bookboard_library::Submission;
use log::debug;

/// `GET /`: the board
pub async fn show_board(State(state): State<AppState>) -> WebResult<Html<String>> {
    let listing = state.shelf.listing().await?;
    Ok(Html(render::board_page(&listing)))
}

/// `POST /`: add a category or a book
///
/// A committed write answers `303 See Other` to `/`. Anything else renders
/// the board exactly as a `GET` would.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<Submission>, FormRejection>,
) -> WebResult<Response> {
    match form {
        Ok(Form(submission)) => {
            if state.shelf.submit(&submission).await?.should_redirect() {
                return Ok(Redirect::to("/").into_response());
            }
        }
        Err(rejection) => debug!("Unreadable form body: {}", rejection),
    }

    Ok(show_board(State(state)).await?.into_response())
}
