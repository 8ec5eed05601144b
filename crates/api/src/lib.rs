//! Quotes API server library.
//!
//! Exposes the building blocks (config, state, dispatcher, error handling,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
