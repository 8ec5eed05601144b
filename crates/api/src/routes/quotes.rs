//! Route definitions and endpoints for the `/qt` resource.
//!
//! Endpoints validate path and body input, then hand a typed
//! [`Operation`] to the dispatcher. Malformed input is rejected before a
//! connection is taken from the pool.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use quotes_core::validation::{parse_id, INVALID_QUOTE_ID};
use quotes_db::models::quote::QuoteInput;

use super::body_error;
use crate::dispatch::{Operation, Outcome};
use crate::error::AppResult;
use crate::state::AppState;

/// Routes for quotes.
///
/// ```text
/// GET    /qt        -> list
/// POST   /qt        -> create
/// GET    /qt/rand   -> random
/// GET    /qt/{id}   -> get_by_id
/// PUT    /qt/{id}   -> update
/// DELETE /qt/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/qt", get(list).post(create))
        .route("/qt/rand", get(random))
        .route("/qt/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /qt
async fn list(State(state): State<AppState>) -> AppResult<Outcome> {
    state.dispatcher.dispatch(Operation::ListQuotes).await
}

/// GET /qt/{id}
async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Outcome> {
    let id = parse_id(&id, INVALID_QUOTE_ID)?;
    state.dispatcher.dispatch(Operation::GetQuote(id)).await
}

/// GET /qt/rand
async fn random(State(state): State<AppState>) -> AppResult<Outcome> {
    state.dispatcher.dispatch(Operation::RandomQuote).await
}

/// POST /qt
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<QuoteInput>, JsonRejection>,
) -> AppResult<Outcome> {
    let Json(input) = payload.map_err(body_error)?;
    let quote = input.validate()?;
    state.dispatcher.dispatch(Operation::CreateQuote(quote)).await
}

/// PUT /qt/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<QuoteInput>, JsonRejection>,
) -> AppResult<Outcome> {
    let id = parse_id(&id, INVALID_QUOTE_ID)?;
    let Json(input) = payload.map_err(body_error)?;
    let quote = input.validate()?;
    state
        .dispatcher
        .dispatch(Operation::UpdateQuote(id, quote))
        .await
}

/// DELETE /qt/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Outcome> {
    let id = parse_id(&id, INVALID_QUOTE_ID)?;
    state.dispatcher.dispatch(Operation::DeleteQuote(id)).await
}
