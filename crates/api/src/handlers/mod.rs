//! Operation handlers.
//!
//! Each handler runs inside the transaction opened by
//! [`crate::dispatch::Dispatcher`] and never commits or rolls back itself.
//! Returning `Err` is enough to abort the unit of work.

pub mod category;
pub mod quote;

use quotes_core::error::CoreError;
use quotes_core::validation::INVALID_CATEGORY_ID;
use quotes_db::{constraint_violation, ConstraintViolation};

use crate::error::AppError;

pub const MISSING_REQUIRED_FIELD: &str = "missing required field";
pub const INVALID_FIELD_VALUE: &str = "invalid field value";

/// Translate a failed write into a client error when storage rejected the
/// input itself, or keep it as an unclassified database fault otherwise.
pub fn storage_error(err: sqlx::Error) -> AppError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::ForeignKey) => CoreError::validation(INVALID_CATEGORY_ID).into(),
        Some(ConstraintViolation::NotNull) => CoreError::validation(MISSING_REQUIRED_FIELD).into(),
        Some(ConstraintViolation::Check) => CoreError::validation(INVALID_FIELD_VALUE).into(),
        None => AppError::Database(err),
    }
}
