//! Storage layer: connection pool, query catalog, row models and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod catalog;
pub mod mapper;
pub mod models;
pub mod repositories;

pub use catalog::{CatalogError, QueryCatalog, QueryName};

pub type DbPool = sqlx::PgPool;

/// Sizing and recycling limits for the connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    /// Longest a caller may wait for a connection before `PoolTimedOut`.
    pub acquire_timeout: Duration,
    /// Idle connections older than this are closed (down to `min_connections`).
    pub idle_timeout: Duration,
    /// Connections older than this are closed and replaced on release.
    pub max_lifetime: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 20,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl PoolConfig {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }
}

/// Create a connection pool from a database URL, opening connections eagerly.
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    config.options().connect(database_url).await
}

/// Create a pool that opens no connection until the first acquire.
pub fn create_lazy_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    config.options().connect_lazy(database_url)
}

/// Round-trip a trivial statement to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Storage constraint failures that callers report as bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// SQLSTATE 23503, e.g. a quote naming a category that does not exist.
    ForeignKey,
    /// SQLSTATE 23502, a required column was bound to NULL.
    NotNull,
    /// SQLSTATE 23514, a CHECK constraint rejected the row.
    Check,
}

/// Classify a sqlx error as a constraint violation, if it is one.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    match db_err.code().as_deref() {
        Some("23503") => Some(ConstraintViolation::ForeignKey),
        Some("23502") => Some(ConstraintViolation::NotNull),
        Some("23514") => Some(ConstraintViolation::Check),
        _ => None,
    }
}
