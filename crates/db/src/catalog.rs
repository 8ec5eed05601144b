//! Named SQL statements loaded once at startup.
//!
//! The catalog file is a JSON object mapping each [`QueryName`] key to a
//! PostgreSQL statement. Loading fails if a key is unknown, missing, or blank,
//! so every lookup afterwards is infallible.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Every statement the handlers execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum QueryName {
    /// All quotes. Row: `id, author, text, image_name, category_id`.
    #[serde(rename = "ALL")]
    AllQuotes,
    /// One quote by id (`$1`).
    #[serde(rename = "CHERRYPICK")]
    QuoteById,
    /// One quote chosen at random.
    #[serde(rename = "RAND")]
    RandomQuote,
    /// Insert `(author, text, category_id, image_name)`, returning `id`.
    #[serde(rename = "SUBMIT")]
    InsertQuote,
    /// Replace `(author, text, category_id, image_name)` of quote `$5`.
    #[serde(rename = "CHANGE")]
    UpdateQuote,
    /// Delete quote `$1`.
    #[serde(rename = "REMOVE")]
    DeleteQuote,
    /// All categories. Row: `id, name`.
    #[serde(rename = "CAT_ALL")]
    AllCategories,
    /// One category by id (`$1`).
    #[serde(rename = "CAT_CHERRYPICK")]
    CategoryById,
    /// Insert `(name)`, returning `id`.
    #[serde(rename = "CAT_SUBMIT")]
    InsertCategory,
    /// Delete category `$1`.
    #[serde(rename = "CAT_REMOVE")]
    DeleteCategory,
}

impl QueryName {
    pub const ALL: [QueryName; 10] = [
        QueryName::AllQuotes,
        QueryName::QuoteById,
        QueryName::RandomQuote,
        QueryName::InsertQuote,
        QueryName::UpdateQuote,
        QueryName::DeleteQuote,
        QueryName::AllCategories,
        QueryName::CategoryById,
        QueryName::InsertCategory,
        QueryName::DeleteCategory,
    ];

    /// Key used for this statement in the catalog file.
    pub fn key(self) -> &'static str {
        match self {
            QueryName::AllQuotes => "ALL",
            QueryName::QuoteById => "CHERRYPICK",
            QueryName::RandomQuote => "RAND",
            QueryName::InsertQuote => "SUBMIT",
            QueryName::UpdateQuote => "CHANGE",
            QueryName::DeleteQuote => "REMOVE",
            QueryName::AllCategories => "CAT_ALL",
            QueryName::CategoryById => "CAT_CHERRYPICK",
            QueryName::InsertCategory => "CAT_SUBMIT",
            QueryName::DeleteCategory => "CAT_REMOVE",
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read query catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse query catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Query catalog has no statement for {0}")]
    Missing(QueryName),
}

/// Immutable name → statement mapping shared by all handlers.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    statements: HashMap<QueryName, String>,
}

impl QueryCatalog {
    /// Read and validate the catalog file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), statements = catalog.statements.len(), "Loaded query catalog");
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let statements: HashMap<QueryName, String> = serde_json::from_str(json)?;
        for name in QueryName::ALL {
            match statements.get(&name) {
                Some(sql) if !sql.trim().is_empty() => {}
                _ => return Err(CatalogError::Missing(name)),
            }
        }
        Ok(Self { statements })
    }

    /// Statement registered for `name`.
    pub fn get(&self, name: QueryName) -> &str {
        // Presence of every name is checked in `from_json`.
        self.statements
            .get(&name)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
