use quotes_core::error::CoreError;
use quotes_core::types::DbId;
use quotes_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quotes` table as returned by the catalog statements.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteRow {
    pub id: DbId,
    pub author: String,
    pub text: String,
    pub image_name: Option<String>,
    pub category_id: Option<DbId>,
}

/// A quote as presented to clients.
///
/// `category` is the category id rendered as text and `image` is the
/// resolved image path; both are empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub author: String,
    pub text: String,
    pub category: String,
    pub image: String,
}

/// Request body for creating or replacing a quote.
///
/// Any `id` field in the body is ignored; ids come from storage or the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteInput {
    pub author: Option<String>,
    pub text: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// A validated quote ready to bind to `SUBMIT` / `CHANGE`.
///
/// `author` and `text` stay optional so a missing field reaches storage as
/// NULL and is reported through the not-null constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub author: Option<String>,
    pub text: Option<String>,
    pub category_id: Option<DbId>,
    pub image_name: Option<String>,
}

impl QuoteInput {
    pub fn validate(self) -> Result<NewQuote, CoreError> {
        let category_id = validation::parse_category_ref(self.category.as_deref())?;
        Ok(NewQuote {
            author: self.author,
            text: self.text,
            category_id,
            image_name: validation::image_name(self.image.as_deref()),
        })
    }
}
