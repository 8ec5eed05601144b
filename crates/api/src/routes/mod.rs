pub mod categories;
pub mod health;
pub mod pictures;
pub mod quotes;

use axum::extract::rejection::JsonRejection;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

pub const DATA_FORMAT_ERROR: &str = "data format error";

/// Build the quote and category route tree.
///
/// ```text
/// /qt, /qt/rand, /qt/{id}     quotes
/// /cat, /cat/{id}             categories
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(quotes::router())
        .merge(categories::router())
}

/// Map an unreadable JSON body to a client error, keeping the detail in logs.
pub(crate) fn body_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::BadRequest(DATA_FORMAT_ERROR.to_string())
}
