//! Bookboard HTTP Server
//!
//! One page at `/`: `GET` shows the categories with their books, `POST`
//! adds a category or a book and redirects back.

pub mod error;
pub mod render;
pub mod routes;

pub use error::{WebError, WebResult};

use axum::routing::get;
use axum::Router;
use bookboard_library::Bookshelf;
use tokio::net::TcpListener;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub shelf: Bookshelf,
}

impl AppState {
    pub fn new(shelf: Bookshelf) -> Self {
        Self { shelf }
    }
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::show_board).post(routes::submit))
        .with_state(state)
}

/// Serves the board on `listener` until the process is stopped
pub async fn serve(listener: TcpListener, shelf: Bookshelf) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!(
            "Serving bookboard on http://{} ({} store)",
            addr,
            shelf.backend_name()
        );
    }

    axum::serve(listener, router(AppState::new(shelf))).await
}
