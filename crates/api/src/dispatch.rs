//! Transactional request dispatcher.
//!
//! Every operation runs as one unit of work: acquire a pooled connection
//! under a deadline, begin a transaction, run the matching handler, then
//! commit on success or roll back on any error. The connection is owned by
//! [`Dispatcher::dispatch`] and returns to the pool exactly once, when it is
//! dropped. If the dispatch future itself is dropped (request timeout, client
//! gone), dropping the open `Transaction` queues a rollback before the
//! connection goes back to the pool.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quotes_core::error::CoreError;
use quotes_core::images::ImageResolver;
use quotes_core::types::DbId;
use quotes_db::mapper::RowMapper;
use quotes_db::models::category::Category;
use quotes_db::models::quote::{NewQuote, Quote};
use quotes_db::{DbPool, QueryCatalog};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgConnection, Postgres};

use crate::error::{AppError, AppResult};
use crate::handlers::{category, quote};

/// One inbound operation, with its input already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListQuotes,
    GetQuote(DbId),
    RandomQuote,
    CreateQuote(NewQuote),
    UpdateQuote(DbId, NewQuote),
    DeleteQuote(DbId),
    ListCategories,
    GetCategory(DbId),
    CreateCategory(String),
    DeleteCategory(DbId),
}

impl Operation {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListQuotes => "list_quotes",
            Operation::GetQuote(_) => "get_quote",
            Operation::RandomQuote => "random_quote",
            Operation::CreateQuote(_) => "create_quote",
            Operation::UpdateQuote(..) => "update_quote",
            Operation::DeleteQuote(_) => "delete_quote",
            Operation::ListCategories => "list_categories",
            Operation::GetCategory(_) => "get_category",
            Operation::CreateCategory(_) => "create_category",
            Operation::DeleteCategory(_) => "delete_category",
        }
    }
}

/// Successful result of an [`Operation`], rendered straight into a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Quotes(Vec<Quote>),
    Quote(Quote),
    QuoteCreated(Quote),
    Categories(Vec<Category>),
    Category(Category),
    CategoryCreated(Category),
    Deleted,
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Quotes(quotes) => Json(quotes).into_response(),
            Outcome::Quote(quote) => Json(quote).into_response(),
            Outcome::QuoteCreated(quote) => (StatusCode::CREATED, Json(quote)).into_response(),
            Outcome::Categories(categories) => Json(categories).into_response(),
            Outcome::Category(category) => Json(category).into_response(),
            Outcome::CategoryCreated(category) => {
                (StatusCode::CREATED, Json(category)).into_response()
            }
            Outcome::Deleted => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Read-only collaborators a handler needs besides its connection.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub catalog: &'a QueryCatalog,
    pub images: &'a ImageResolver,
}

impl<'a> HandlerContext<'a> {
    pub fn mapper(&self) -> RowMapper<'a> {
        RowMapper::new(self.images)
    }
}

/// Runs operations against the pool, one transaction per operation.
#[derive(Debug)]
pub struct Dispatcher {
    pool: DbPool,
    catalog: Arc<QueryCatalog>,
    images: Arc<ImageResolver>,
    acquire_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        pool: DbPool,
        catalog: Arc<QueryCatalog>,
        images: Arc<ImageResolver>,
        acquire_timeout: Duration,
    ) -> Self {
        Self {
            pool,
            catalog,
            images,
            acquire_timeout,
        }
    }

    pub async fn dispatch(&self, op: Operation) -> AppResult<Outcome> {
        let name = op.name();
        let started = Instant::now();

        let mut conn = self.acquire(name).await?;
        let mut tx = conn.begin().await?;

        let ctx = HandlerContext {
            catalog: &self.catalog,
            images: &self.images,
        };

        match execute(&mut tx, ctx, op).await {
            Ok(outcome) => {
                tx.commit().await.map_err(|e| {
                    tracing::error!(op = name, error = %e, "Commit failed");
                    CoreError::Internal(format!("commit of {name} failed: {e}"))
                })?;
                tracing::debug!(
                    op = name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Operation committed"
                );
                Ok(outcome)
            }
            Err(err) => {
                if let Err(e) = tx.rollback().await {
                    tracing::error!(op = name, error = %e, "Rollback failed");
                }
                tracing::warn!(op = name, error = %err, "Operation rolled back");
                Err(err)
            }
        }
    }

    /// Wait for a pooled connection, failing fast once the deadline passes.
    async fn acquire(&self, op: &'static str) -> AppResult<PoolConnection<Postgres>> {
        match tokio::time::timeout(self.acquire_timeout, self.pool.acquire()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(sqlx::Error::PoolTimedOut)) | Err(_) => {
                tracing::warn!(
                    op,
                    timeout_ms = self.acquire_timeout.as_millis() as u64,
                    pool_size = self.pool.size(),
                    idle = self.pool.num_idle(),
                    "Timed out acquiring database connection"
                );
                Err(AppError::Core(CoreError::ResourceExhausted(format!(
                    "no database connection within {:?}",
                    self.acquire_timeout
                ))))
            }
            Ok(Err(e)) => Err(AppError::Database(e)),
        }
    }
}

/// Route an operation to its handler.
async fn execute(
    conn: &mut PgConnection,
    ctx: HandlerContext<'_>,
    op: Operation,
) -> AppResult<Outcome> {
    match op {
        Operation::ListQuotes => quote::list(conn, ctx).await,
        Operation::GetQuote(id) => quote::get_by_id(conn, ctx, id).await,
        Operation::RandomQuote => quote::random(conn, ctx).await,
        Operation::CreateQuote(input) => quote::create(conn, ctx, &input).await,
        Operation::UpdateQuote(id, input) => quote::update(conn, ctx, id, &input).await,
        Operation::DeleteQuote(id) => quote::delete(conn, ctx, id).await,
        Operation::ListCategories => category::list(conn, ctx).await,
        Operation::GetCategory(id) => category::get_by_id(conn, ctx, id).await,
        Operation::CreateCategory(name) => category::create(conn, ctx, &name).await,
        Operation::DeleteCategory(id) => category::delete(conn, ctx, id).await,
    }
}
