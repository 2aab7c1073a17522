//! Response types, including RFC 7807 compliant error bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use board_core::domain::{Category, Post, Writer};
use board_core::page::Page;

/// Unpaged collection wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Paged collection wrapper: the page's items plus the total matching count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<U> PageResponse<U> {
    pub fn from_page<T, F>(page: Page<T>, f: F) -> Self
    where
        F: FnMut(T) -> U,
    {
        Self {
            items: page.items.into_iter().map(f).collect(),
            total: page.total,
        }
    }
}

/// Full category representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Category summary embedded in post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPreview {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryPreview {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// Public view of a post's writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
}

impl From<Writer> for UserView {
    fn from(writer: Writer) -> Self {
        Self { id: writer.id }
    }
}

/// Full post representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub category: CategoryPreview,
    pub title: String,
    pub writer: UserView,
    pub view_count: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            category: post.category.into(),
            title: post.title,
            writer: post.writer.into(),
            view_count: post.view_count,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Post summary used in paginated listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub id: i64,
    pub title: String,
    pub writer: UserView,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostPreview {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            writer: post.writer.into(),
            created_at: post.created_at,
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs, extended with the machine-readable
/// error kind (`code`) and optional per-field validation errors.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// Machine-readable error kind, e.g. `NOT_FOUND_POST`.
    pub code: String,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Per-field validation errors, present for request validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(status: u16, code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            code: code.into(),
            detail: None,
            errors: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// One request-validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
