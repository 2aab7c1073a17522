use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, Value};

use board_core::error::RepoError;
use board_core::page::PageRequest;
use board_core::ports::{BoardStore, BoardTx};
use board_core::sort::SortOrder;

use crate::database::SeaOrmBoardStore;
use crate::database::entity::{category, post};

fn category_row(id: i64, name: &str) -> category::Model {
    let now = chrono::Utc::now();
    category::Model {
        id,
        name: name.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_row(id: i64, category_id: i64, title: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id,
        category_id,
        title: title.to_owned(),
        writer_id: "writer-1".to_owned(),
        content: "content".to_owned(),
        view_count: 0,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_find_category_maps_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category_row(1, "general")]])
        .into_connection();

    let store = SeaOrmBoardStore::new(db);
    let mut tx = store.begin().await.unwrap();

    let found = tx.find_category(1).await.unwrap().unwrap();
    tx.commit().await.unwrap();

    assert_eq!(found.id, 1);
    assert_eq!(found.name, "general");
}

#[tokio::test]
async fn test_cloned_store_shares_the_connection() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category_row(1, "general")]])
        .append_query_results(vec![vec![category_row(2, "news")]])
        .into_connection();

    let store = SeaOrmBoardStore::new(db);
    let clone = store.clone();

    let mut tx = store.begin().await.unwrap();
    let first = tx.find_category(1).await.unwrap().unwrap();
    tx.commit().await.unwrap();

    let mut tx = clone.begin().await.unwrap();
    let second = tx.find_category(2).await.unwrap().unwrap();
    tx.commit().await.unwrap();

    assert_eq!(first.name, "general");
    assert_eq!(second.name, "news");
}

#[tokio::test]
async fn test_find_post_resolves_category() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(
            post_row(7, 1, "Hello"),
            category_row(1, "general"),
        )]])
        .into_connection();

    let store = SeaOrmBoardStore::new(db);
    let mut tx = store.begin().await.unwrap();

    let found = tx.find_post(7).await.unwrap().unwrap();
    tx.commit().await.unwrap();

    assert_eq!(found.id, 7);
    assert_eq!(found.title, "Hello");
    assert_eq!(found.category.name, "general");
    assert_eq!(found.writer.id, "writer-1");
}

#[tokio::test]
async fn test_paged_listing_returns_items_and_total() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(2)]])
        .append_query_results(vec![vec![
            (post_row(2, 1, "Second"), category_row(1, "general")),
            (post_row(1, 1, "First"), category_row(1, "general")),
        ]])
        .into_connection();

    let store = SeaOrmBoardStore::new(db);
    let mut tx = store.begin().await.unwrap();

    let page = PageRequest::with_sort(0, 10, vec![SortOrder::desc("id")]);
    let result = tx.find_posts_by_category(1, &page).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].id, 2);
    assert_eq!(result.items[1].id, 1);
}

#[tokio::test]
async fn test_unknown_sort_property_rejected_before_querying() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let store = SeaOrmBoardStore::new(db);
    let mut tx = store.begin().await.unwrap();

    let page = PageRequest::with_sort(0, 10, vec![SortOrder::asc("writer.password")]);
    let err = tx.find_posts_by_category(1, &page).await.unwrap_err();
    tx.rollback().await.unwrap();

    assert!(matches!(err, RepoError::UnknownSortProperty(p) if p == "writer.password"));
}
