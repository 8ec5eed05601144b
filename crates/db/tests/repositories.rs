//! Integration tests for the quote and category repositories.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`.

use assert_matches::assert_matches;
use quotes_db::models::quote::NewQuote;
use quotes_db::repositories::{CategoryRepo, QuoteRepo};
use quotes_db::{constraint_violation, ConstraintViolation, QueryCatalog};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn catalog() -> QueryCatalog {
    QueryCatalog::from_json(include_str!("../../../dbqueries.json")).unwrap()
}

fn new_quote(category_id: Option<i64>) -> NewQuote {
    NewQuote {
        author: Some("Epictetus".to_string()),
        text: Some("No man is free who is not master of himself.".to_string()),
        category_id,
        image_name: None,
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_then_find_quote(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let category = CategoryRepo::create(&mut conn, &catalog, "Stoics").await.unwrap();
    let id = QuoteRepo::create(&mut conn, &catalog, &new_quote(Some(category)))
        .await
        .unwrap();

    let row = QuoteRepo::find_by_id(&mut conn, &catalog, id)
        .await
        .unwrap()
        .expect("quote should exist");
    assert_eq!(row.author, "Epictetus");
    assert_eq!(row.category_id, Some(category));
    assert_eq!(row.image_name, None);
}

#[sqlx::test]
async fn unknown_category_is_a_foreign_key_violation(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let err = QuoteRepo::create(&mut conn, &catalog, &new_quote(Some(999)))
        .await
        .unwrap_err();
    assert_matches!(constraint_violation(&err), Some(ConstraintViolation::ForeignKey));
}

#[sqlx::test]
async fn missing_author_is_a_not_null_violation(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let input = NewQuote {
        author: None,
        ..new_quote(None)
    };
    let err = QuoteRepo::create(&mut conn, &catalog, &input).await.unwrap_err();
    assert_matches!(constraint_violation(&err), Some(ConstraintViolation::NotNull));
}

#[sqlx::test]
async fn update_missing_quote_affects_nothing(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let updated = QuoteRepo::update(&mut conn, &catalog, 42, &new_quote(None))
        .await
        .unwrap();
    assert!(!updated);
    assert!(QuoteRepo::list(&mut conn, &catalog).await.unwrap().is_empty());
}

#[sqlx::test]
async fn update_replaces_every_field(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let id = QuoteRepo::create(
        &mut conn,
        &catalog,
        &NewQuote {
            image_name: Some("portrait".into()),
            ..new_quote(None)
        },
    )
    .await
    .unwrap();

    let replacement = NewQuote {
        author: Some("Marcus Aurelius".into()),
        text: Some("Waste no more time arguing what a good man should be.".into()),
        category_id: None,
        image_name: None,
    };
    assert!(QuoteRepo::update(&mut conn, &catalog, id, &replacement).await.unwrap());

    let row = QuoteRepo::find_by_id(&mut conn, &catalog, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.author, "Marcus Aurelius");
    assert_eq!(row.image_name, None);
}

#[sqlx::test]
async fn delete_twice_reports_second_miss(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let id = QuoteRepo::create(&mut conn, &catalog, &new_quote(None)).await.unwrap();
    assert!(QuoteRepo::delete(&mut conn, &catalog, id).await.unwrap());
    assert!(!QuoteRepo::delete(&mut conn, &catalog, id).await.unwrap());
}

#[sqlx::test]
async fn random_on_empty_table_is_none(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    assert!(QuoteRepo::random(&mut conn, &catalog).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn deleting_category_orphans_its_quotes(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let category = CategoryRepo::create(&mut conn, &catalog, "Cynics").await.unwrap();
    let quote = QuoteRepo::create(&mut conn, &catalog, &new_quote(Some(category)))
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&mut conn, &catalog, category).await.unwrap());
    assert!(CategoryRepo::find_by_id(&mut conn, &catalog, category)
        .await
        .unwrap()
        .is_none());

    let row = QuoteRepo::find_by_id(&mut conn, &catalog, quote)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.category_id, None);
}

#[sqlx::test]
async fn blank_category_name_is_rejected_by_storage(pool: PgPool) {
    let catalog = catalog();
    let mut conn = pool.acquire().await.unwrap();

    let err = CategoryRepo::create(&mut conn, &catalog, "   ").await.unwrap_err();
    assert_matches!(constraint_violation(&err), Some(ConstraintViolation::Check));
}
