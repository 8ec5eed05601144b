//! Handlers for category operations.

use quotes_core::error::CoreError;
use quotes_core::types::DbId;
use quotes_db::mapper::decode_rows;
use quotes_db::models::category::Category;
use quotes_db::repositories::CategoryRepo;
use sqlx::PgConnection;

use super::storage_error;
use crate::dispatch::{HandlerContext, Outcome};
use crate::error::{AppError, AppResult};

const ENTITY: &str = "Category";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

pub async fn list(conn: &mut PgConnection, ctx: HandlerContext<'_>) -> AppResult<Outcome> {
    let rows = CategoryRepo::list(conn, ctx.catalog).await?;
    Ok(Outcome::Categories(decode_rows::<Category>(rows, "category")))
}

pub async fn get_by_id(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    id: DbId,
) -> AppResult<Outcome> {
    let category = CategoryRepo::find_by_id(conn, ctx.catalog, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Outcome::Category(category))
}

/// Insert a category whose name was already trimmed and checked non-empty.
pub async fn create(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    name: &str,
) -> AppResult<Outcome> {
    let id = CategoryRepo::create(conn, ctx.catalog, name)
        .await
        .map_err(storage_error)?;

    tracing::info!(category_id = id, "Category created");
    Ok(Outcome::CategoryCreated(Category {
        id,
        name: name.to_string(),
    }))
}

/// Delete a category. Quotes referencing it lose their category.
pub async fn delete(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    id: DbId,
) -> AppResult<Outcome> {
    if CategoryRepo::delete(conn, ctx.catalog, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(Outcome::Deleted)
    } else {
        Err(not_found(id))
    }
}
