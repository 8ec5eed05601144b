//! Handlers for quote operations.

use quotes_core::error::CoreError;
use quotes_core::types::DbId;
use quotes_db::models::quote::NewQuote;
use quotes_db::repositories::QuoteRepo;
use sqlx::PgConnection;

use super::storage_error;
use crate::dispatch::{HandlerContext, Outcome};
use crate::error::{AppError, AppResult};

const ENTITY: &str = "Quote";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

pub async fn list(conn: &mut PgConnection, ctx: HandlerContext<'_>) -> AppResult<Outcome> {
    let rows = QuoteRepo::list(conn, ctx.catalog).await?;
    Ok(Outcome::Quotes(ctx.mapper().quotes(rows)))
}

pub async fn get_by_id(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    id: DbId,
) -> AppResult<Outcome> {
    let row = QuoteRepo::find_by_id(conn, ctx.catalog, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Outcome::Quote(ctx.mapper().quote(row)))
}

pub async fn random(conn: &mut PgConnection, ctx: HandlerContext<'_>) -> AppResult<Outcome> {
    let row = QuoteRepo::random(conn, ctx.catalog)
        .await?
        .ok_or(AppError::Core(CoreError::Empty { entity: "quotes" }))?;
    Ok(Outcome::Quote(ctx.mapper().quote(row)))
}

/// Insert a quote and return it as stored, with its image resolved.
pub async fn create(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    input: &NewQuote,
) -> AppResult<Outcome> {
    let id = QuoteRepo::create(conn, ctx.catalog, input)
        .await
        .map_err(storage_error)?;

    let row = QuoteRepo::find_by_id(conn, ctx.catalog, id)
        .await?
        .ok_or_else(|| CoreError::Internal(format!("quote {id} missing right after insert")))?;

    tracing::info!(quote_id = id, category_id = ?input.category_id, "Quote created");
    Ok(Outcome::QuoteCreated(ctx.mapper().quote(row)))
}

/// Replace every field of quote `id`.
pub async fn update(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    id: DbId,
    input: &NewQuote,
) -> AppResult<Outcome> {
    let updated = QuoteRepo::update(conn, ctx.catalog, id, input)
        .await
        .map_err(storage_error)?;
    if !updated {
        return Err(not_found(id));
    }

    let row = QuoteRepo::find_by_id(conn, ctx.catalog, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(quote_id = id, "Quote replaced");
    Ok(Outcome::Quote(ctx.mapper().quote(row)))
}

pub async fn delete(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    id: DbId,
) -> AppResult<Outcome> {
    if QuoteRepo::delete(conn, ctx.catalog, id).await? {
        tracing::info!(quote_id = id, "Quote deleted");
        Ok(Outcome::Deleted)
    } else {
        Err(not_found(id))
    }
}
