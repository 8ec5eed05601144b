//! Input validation applied before any statement reaches storage.
//!
//! Every helper returns [`CoreError::Validation`] with the exact message
//! surfaced to the client.

use crate::error::CoreError;
use crate::types::DbId;

pub const INVALID_QUOTE_ID: &str = "invalid quote id";
pub const INVALID_CATEGORY_ID: &str = "invalid category id";
pub const EMPTY_CATEGORY_NAME: &str = "category name must not be empty";

/// Parse a path identifier such as the `42` in `/qt/42`.
pub fn parse_id(raw: &str, invalid_msg: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::validation(invalid_msg))
}

/// Parse an optional category reference from a request body.
///
/// A missing or blank reference means "no category". Anything else must be
/// a numeric id; whether it names an existing category is left to storage.
pub fn parse_category_ref(raw: Option<&str>) -> Result<Option<DbId>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<DbId>()
            .map(Some)
            .map_err(|_| CoreError::validation(INVALID_CATEGORY_ID)),
    }
}

/// Trim a category name and reject it if nothing is left.
pub fn category_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::validation(EMPTY_CATEGORY_NAME));
    }
    Ok(name.to_string())
}

/// Collapse a blank explicit image name into "no image".
pub fn image_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
