//! Repository for the `quotes` table.

use quotes_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::PgConnection;

use crate::catalog::{QueryCatalog, QueryName};
use crate::models::quote::{NewQuote, QuoteRow};

pub struct QuoteRepo;

impl QuoteRepo {
    /// Fetch every quote as raw rows; decoding happens per row in the mapper.
    pub async fn list(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
    ) -> Result<Vec<PgRow>, sqlx::Error> {
        sqlx::query(catalog.get(QueryName::AllQuotes))
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        id: DbId,
    ) -> Result<Option<QuoteRow>, sqlx::Error> {
        sqlx::query_as::<_, QuoteRow>(catalog.get(QueryName::QuoteById))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Pick one quote at random. `None` when the table is empty.
    pub async fn random(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
    ) -> Result<Option<QuoteRow>, sqlx::Error> {
        sqlx::query_as::<_, QuoteRow>(catalog.get(QueryName::RandomQuote))
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a quote, returning its generated id.
    pub async fn create(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        input: &NewQuote,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(catalog.get(QueryName::InsertQuote))
            .bind(&input.author)
            .bind(&input.text)
            .bind(input.category_id)
            .bind(&input.image_name)
            .fetch_one(&mut *conn)
            .await
    }

    /// Replace every field of a quote. Returns `true` if a row was updated.
    pub async fn update(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        id: DbId,
        input: &NewQuote,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(catalog.get(QueryName::UpdateQuote))
            .bind(&input.author)
            .bind(&input.text)
            .bind(input.category_id)
            .bind(&input.image_name)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a quote by ID. Returns `true` if a row was deleted.
    pub async fn delete(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(catalog.get(QueryName::DeleteQuote))
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
