use quotes_core::error::CoreError;
use quotes_core::types::DbId;
use quotes_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// Request body for creating a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,
}

impl CategoryInput {
    /// Returns the trimmed, non-empty name.
    pub fn validate(self) -> Result<String, CoreError> {
        validation::category_name(self.name.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_is_rejected() {
        assert!(CategoryInput::default().validate().is_err());
    }

    #[test]
    fn name_is_trimmed() {
        let input = CategoryInput {
            name: Some("  Stoics ".into()),
        };
        assert_eq!(input.validate().unwrap(), "Stoics");
    }
}
