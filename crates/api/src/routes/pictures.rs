//! Static serving of picture assets under `/pictures`.
//!
//! Only files are served. Directory requests get 404, never an index page
//! or a listing.

use std::path::Path;

use axum::Router;
use quotes_core::images::PICTURES_ROUTE;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn router(dir: &Path) -> Router<AppState> {
    tracing::info!(path = %dir.display(), "Serving pictures from {PICTURES_ROUTE}");

    let serve_dir = ServeDir::new(dir).append_index_html_on_directories(false);
    Router::new().nest_service(PICTURES_ROUTE, serve_dir)
}
