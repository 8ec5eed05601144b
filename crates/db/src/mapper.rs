//! Conversion of storage rows into domain records.
//!
//! Nullable columns are normalized here, once: an absent category becomes an
//! empty string and a NULL or blank image name means "no explicit image".

use quotes_core::images::ImageResolver;
use quotes_core::validation;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

use crate::models::quote::{Quote, QuoteRow};

/// Maps quote rows to [`Quote`] records, resolving their image paths.
#[derive(Debug, Clone, Copy)]
pub struct RowMapper<'a> {
    images: &'a ImageResolver,
}

impl<'a> RowMapper<'a> {
    pub fn new(images: &'a ImageResolver) -> Self {
        Self { images }
    }

    pub fn quote(&self, row: QuoteRow) -> Quote {
        let image_name = validation::image_name(row.image_name.as_deref());
        let category = row.category_id.map(|id| id.to_string());
        let image = self
            .images
            .resolve(image_name.as_deref(), category.as_deref());

        Quote {
            id: row.id,
            author: row.author,
            text: row.text,
            category: category.unwrap_or_default(),
            image,
        }
    }

    /// Decode and map a listing, skipping rows that fail to decode.
    pub fn quotes(&self, rows: Vec<PgRow>) -> Vec<Quote> {
        decode_rows::<QuoteRow>(rows, "quote")
            .into_iter()
            .map(|row| self.quote(row))
            .collect()
    }
}

/// Decode every row of a listing into `T`.
///
/// A row that fails to decode is logged and dropped; the rest of the listing
/// is still returned.
pub fn decode_rows<T>(rows: Vec<PgRow>, entity: &'static str) -> Vec<T>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let total = rows.len();
    let decoded: Vec<T> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match T::from_row(row) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(entity, index, error = %e, "Skipping row that failed to decode");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!(entity, total, skipped = total - decoded.len(), "Listing returned partially");
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(image_name: Option<&str>, category_id: Option<i64>) -> QuoteRow {
        QuoteRow {
            id: 5,
            author: "Seneca".into(),
            text: "Luck is what happens when preparation meets opportunity.".into(),
            image_name: image_name.map(str::to_string),
            category_id,
        }
    }

    fn resolver_with_fallbacks(categories: &[i64]) -> (tempfile::TempDir, ImageResolver) {
        let dir = tempfile::tempdir().unwrap();
        for c in categories {
            std::fs::write(dir.path().join(format!("fb_{c}.file")), b"img").unwrap();
        }
        let resolver = ImageResolver::scan(dir.path()).unwrap();
        (dir, resolver)
    }

    #[test]
    fn absent_columns_become_empty_strings() {
        let (_dir, images) = resolver_with_fallbacks(&[]);
        let quote = RowMapper::new(&images).quote(row(None, None));
        assert_eq!(quote.category, "");
        assert_eq!(quote.image, "");
        assert_eq!(quote.id, 5);
    }

    #[test]
    fn explicit_image_wins_over_category_fallback() {
        let (_dir, images) = resolver_with_fallbacks(&[2]);
        let quote = RowMapper::new(&images).quote(row(Some("stoa"), Some(2)));
        assert_eq!(quote.image, "/pictures/stoa.file");
        assert_eq!(quote.category, "2");
    }

    #[test]
    fn blank_image_name_uses_category_fallback() {
        let (_dir, images) = resolver_with_fallbacks(&[2]);
        let quote = RowMapper::new(&images).quote(row(Some("  "), Some(2)));
        assert_eq!(quote.image, "/pictures/fb_2.file");
    }

    #[test]
    fn category_without_fallback_asset_has_no_image() {
        let (_dir, images) = resolver_with_fallbacks(&[2]);
        let quote = RowMapper::new(&images).quote(row(None, Some(3)));
        assert_eq!(quote.image, "");
        assert_eq!(quote.category, "3");
    }
}
