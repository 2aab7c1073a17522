//! Service behavior over the in-memory store.

use board_core::domain::Writer;
use board_core::error::ErrorCode;
use board_core::page::PageRequest;
use board_core::service::{
    CategoryParam, CategoryService, PostParam, PostService, SimpleCategoryService,
    SimplePostService,
};
use board_core::sort::SortOrder;

use crate::memory::InMemoryBoardStore;

fn writer(id: &str) -> Writer {
    Writer { id: id.to_owned() }
}

fn services() -> (
    SimpleCategoryService<InMemoryBoardStore>,
    SimplePostService<InMemoryBoardStore>,
) {
    let store = InMemoryBoardStore::new();
    (
        SimpleCategoryService::new(store.clone()),
        SimplePostService::new(store),
    )
}

fn post_param(title: &str, content: &str, category_id: i64) -> PostParam {
    PostParam {
        title: title.to_owned(),
        content: content.to_owned(),
        category_id,
    }
}

#[tokio::test]
async fn create_category_assigns_id_and_persists() {
    let (categories, _) = services();

    let created = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    assert!(created.id > 0);

    let found = categories.find_by_id(created.id).await.unwrap();
    assert_eq!(found.name, "general");
}

#[tokio::test]
async fn blank_category_name_is_rejected_and_nothing_persists() {
    let (categories, _) = services();

    let err = categories
        .create(CategoryParam {
            name: "   ".to_owned(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidCategoryName);
    assert!(categories.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_category_lookup_is_not_found_and_releases_the_store() {
    let (categories, _) = services();

    let err = categories.find_by_id(7).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFoundCategory);

    // The failed lookup's transaction was rolled back, not left open.
    let created = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    assert!(created.id > 0);
}

#[tokio::test]
async fn update_category_renames() {
    let (categories, _) = services();
    let created = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    let updated = categories
        .update(
            created.id,
            CategoryParam {
                name: "news".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "news");
}

#[tokio::test]
async fn update_missing_category_is_not_found() {
    let (categories, _) = services();

    let err = categories
        .update(
            99,
            CategoryParam {
                name: "news".to_owned(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFoundCategory);
}

#[tokio::test]
async fn blank_rename_is_rejected_and_rolled_back() {
    let (categories, _) = services();
    let created = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    let err = categories
        .update(created.id, CategoryParam { name: "".to_owned() })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCategoryName);

    let found = categories.find_by_id(created.id).await.unwrap();
    assert_eq!(found.name, "general");
}

#[tokio::test]
async fn deleting_a_category_removes_its_posts() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    let post = posts
        .create(post_param("Hello", "world", category.id), writer("alice"))
        .await
        .unwrap();

    categories.delete(category.id).await.unwrap();

    assert_eq!(
        categories.find_by_id(category.id).await.unwrap_err().code,
        ErrorCode::NotFoundCategory
    );
    assert_eq!(
        posts.find_by_id(post.id).await.unwrap_err().code,
        ErrorCode::NotFoundPost
    );
}

#[tokio::test]
async fn post_with_unresolvable_category_is_a_validation_failure() {
    let (_, posts) = services();

    let err = posts
        .create(post_param("Hello", "world", 42), writer("alice"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidPostCategory);
}

#[tokio::test]
async fn blank_title_is_checked_before_blank_content() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    let err = posts
        .create(post_param(" ", " ", category.id), writer("alice"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPostTitle);

    let err = posts
        .create(post_param("Hello", " ", category.id), writer("alice"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPostContent);
}

#[tokio::test]
async fn only_the_writer_may_update() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let post = posts
        .create(post_param("Hello", "world", category.id), writer("alice"))
        .await
        .unwrap();

    let err = posts
        .update(
            post.id,
            post_param("Hijacked", "world", category.id),
            writer("bob"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotPostOwner);

    // Denied update leaves the post untouched.
    let found = posts.find_by_id(post.id).await.unwrap();
    assert_eq!(found.title, "Hello");
}

#[tokio::test]
async fn only_the_writer_may_delete() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let post = posts
        .create(post_param("Hello", "world", category.id), writer("alice"))
        .await
        .unwrap();

    let err = posts.delete(post.id, writer("bob")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotPostOwner);

    assert!(posts.find_by_id(post.id).await.is_ok());

    posts.delete(post.id, writer("alice")).await.unwrap();
    assert_eq!(
        posts.find_by_id(post.id).await.unwrap_err().code,
        ErrorCode::NotFoundPost
    );
}

#[tokio::test]
async fn ownership_is_checked_before_category_and_field_validation() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let post = posts
        .create(post_param("Hello", "world", category.id), writer("alice"))
        .await
        .unwrap();

    // Bad category and blank title, but the ownership failure wins.
    let err = posts
        .update(post.id, post_param(" ", " ", 999), writer("bob"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotPostOwner);
}

#[tokio::test]
async fn every_read_increments_the_view_count() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let post = posts
        .create(post_param("Hello", "world", category.id), writer("alice"))
        .await
        .unwrap();
    assert_eq!(post.view_count, 0);

    let first = posts.find_by_id(post.id).await.unwrap();
    let second = posts.find_by_id(post.id).await.unwrap();

    assert_eq!(first.view_count, 1);
    assert_eq!(second.view_count, 2);
}

#[tokio::test]
async fn rejected_update_does_not_count_a_view_or_change_state() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let post = posts
        .create(post_param("Hello", "world", category.id), writer("alice"))
        .await
        .unwrap();

    let err = posts
        .update(post.id, post_param(" ", "world", category.id), writer("alice"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPostTitle);

    let found = posts.find_by_id(post.id).await.unwrap();
    assert_eq!(found.title, "Hello");
    assert_eq!(found.view_count, 1);
}

#[tokio::test]
async fn listing_an_unknown_category_is_not_found_even_with_a_bad_sort() {
    let (_, posts) = services();

    let page = PageRequest::with_sort(0, 10, vec![SortOrder::asc("nope")]);
    let err = posts.find_by_category_id(42, page).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFoundCategory);
}

#[tokio::test]
async fn unknown_sort_property_fails_with_the_property_in_detail() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    let page = PageRequest::with_sort(0, 10, vec![SortOrder::asc("writer.password")]);
    let err = posts
        .find_by_category_id(category.id, page)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidPostSortProperty);
    assert_eq!(err.detail.as_deref(), Some("writer.password"));
}

#[tokio::test]
async fn listing_sorts_and_paginates() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    for title in ["banana", "apple", "cherry"] {
        posts
            .create(post_param(title, "content", category.id), writer("alice"))
            .await
            .unwrap();
    }

    let page = PageRequest::with_sort(0, 2, vec![SortOrder::desc("title")]);
    let result = posts
        .find_by_category_id(category.id, page)
        .await
        .unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].title, "cherry");
    assert_eq!(result.items[1].title, "banana");

    let rest = posts
        .find_by_category_id(
            category.id,
            PageRequest::with_sort(1, 2, vec![SortOrder::desc("title")]),
        )
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
    assert_eq!(rest.items[0].title, "apple");
}

#[tokio::test]
async fn listing_supports_nested_sort_paths_and_empty_sort() {
    let (categories, posts) = services();
    let category = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();

    posts
        .create(post_param("One", "content", category.id), writer("zoe"))
        .await
        .unwrap();
    posts
        .create(post_param("Two", "content", category.id), writer("amir"))
        .await
        .unwrap();

    let page = PageRequest::with_sort(0, 10, vec![SortOrder::asc("writer.id")]);
    let result = posts
        .find_by_category_id(category.id, page)
        .await
        .unwrap();
    assert_eq!(result.items[0].writer.id, "amir");
    assert_eq!(result.items[1].writer.id, "zoe");

    // No sort at all is valid and returns everything.
    let unsorted = posts
        .find_by_category_id(category.id, PageRequest::new(0, 10))
        .await
        .unwrap();
    assert_eq!(unsorted.total, 2);
}

#[tokio::test]
async fn listing_only_returns_the_categorys_posts() {
    let (categories, posts) = services();
    let general = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let news = categories
        .create(CategoryParam {
            name: "news".to_owned(),
        })
        .await
        .unwrap();

    posts
        .create(post_param("In general", "content", general.id), writer("alice"))
        .await
        .unwrap();
    posts
        .create(post_param("In news", "content", news.id), writer("alice"))
        .await
        .unwrap();

    let result = posts
        .find_by_category_id(news.id, PageRequest::new(0, 10))
        .await
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].title, "In news");
}

#[tokio::test]
async fn moving_a_post_to_another_category_requires_it_to_exist() {
    let (categories, posts) = services();
    let general = categories
        .create(CategoryParam {
            name: "general".to_owned(),
        })
        .await
        .unwrap();
    let post = posts
        .create(post_param("Hello", "world", general.id), writer("alice"))
        .await
        .unwrap();

    let err = posts
        .update(post.id, post_param("Hello", "world", 999), writer("alice"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidPostCategory);

    let news = categories
        .create(CategoryParam {
            name: "news".to_owned(),
        })
        .await
        .unwrap();
    let moved = posts
        .update(post.id, post_param("Hello", "world", news.id), writer("alice"))
        .await
        .unwrap();
    assert_eq!(moved.category.id, news.id);
}
