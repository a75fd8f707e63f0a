// FILE: crates/server/src/error.rs

use crate::render;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use bookboard_core::StorageError;
use bookboard_library::LibraryError;
use thiserror::Error;

/// Failure while answering a request
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl From<StorageError> for WebError {
    fn from(err: StorageError) -> Self {
        WebError::Library(LibraryError::Storage(err))
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn user_message(&self) -> String {
        match self {
            WebError::Library(err) => err.user_message(),
        }
    }

    pub fn is_critical(&self) -> bool {
        match self {
            WebError::Library(err) => err.is_critical(),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.is_critical() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request failed: {}", self);
        }
        (self.status(), Html(render::error_page(&self.user_message()))).into_response()
    }
}
