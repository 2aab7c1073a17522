//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Request body for category create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

/// Request body for post create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub category_id: i64,
}

/// Scalar query parameters for the paginated post listing. The repeatable
/// `sort` parameter (`property[,asc|desc]`) is extracted separately, since
/// urlencoded deserialization cannot collect repeated keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageQuery {
    pub category_id: i64,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

fn default_page_size() -> u64 {
    10
}
