//! Route definitions and endpoints for the `/cat` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use quotes_core::validation::{parse_id, INVALID_CATEGORY_ID};
use quotes_db::models::category::CategoryInput;

use super::body_error;
use crate::dispatch::{Operation, Outcome};
use crate::error::AppResult;
use crate::state::AppState;

/// Routes for categories.
///
/// ```text
/// GET    /cat        -> list
/// POST   /cat        -> create
/// GET    /cat/{id}   -> get_by_id
/// DELETE /cat/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cat", get(list).post(create))
        .route("/cat/{id}", get(get_by_id).delete(delete))
}

/// GET /cat
async fn list(State(state): State<AppState>) -> AppResult<Outcome> {
    state.dispatcher.dispatch(Operation::ListCategories).await
}

/// GET /cat/{id}
async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Outcome> {
    let id = parse_id(&id, INVALID_CATEGORY_ID)?;
    state.dispatcher.dispatch(Operation::GetCategory(id)).await
}

/// POST /cat
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> AppResult<Outcome> {
    let Json(input) = payload.map_err(body_error)?;
    let name = input.validate()?;
    state
        .dispatcher
        .dispatch(Operation::CreateCategory(name))
        .await
}

/// DELETE /cat/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Outcome> {
    let id = parse_id(&id, INVALID_CATEGORY_ID)?;
    state.dispatcher.dispatch(Operation::DeleteCategory(id)).await
}
