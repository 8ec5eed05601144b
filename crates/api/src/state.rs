use std::sync::Arc;

use quotes_core::images::ImageResolver;

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything shared sits behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only by the health check.
    pub pool: quotes_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Runs every quote/category operation in its own transaction.
    pub dispatcher: Arc<Dispatcher>,
    /// Picture directory and category fallback index.
    pub images: Arc<ImageResolver>,
}

impl AppState {
    /// Wire the dispatcher from its collaborators.
    pub fn new(
        pool: quotes_db::DbPool,
        config: ServerConfig,
        catalog: Arc<quotes_db::QueryCatalog>,
        images: Arc<ImageResolver>,
    ) -> Self {
        let dispatcher = Dispatcher::new(
            pool.clone(),
            catalog,
            Arc::clone(&images),
            config.pool.acquire_timeout,
        );
        Self {
            pool,
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            images,
        }
    }
}
