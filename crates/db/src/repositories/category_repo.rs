//! Repository for the `categories` table.

use quotes_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::PgConnection;

use crate::catalog::{QueryCatalog, QueryName};
use crate::models::category::Category;

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
    ) -> Result<Vec<PgRow>, sqlx::Error> {
        sqlx::query(catalog.get(QueryName::AllCategories))
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(catalog.get(QueryName::CategoryById))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a category with an already-validated name, returning its id.
    pub async fn create(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        name: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(catalog.get(QueryName::InsertCategory))
            .bind(name)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    pub async fn delete(
        conn: &mut PgConnection,
        catalog: &QueryCatalog,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(catalog.get(QueryName::DeleteCategory))
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
