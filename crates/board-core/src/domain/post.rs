use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Writer};

/// Post entity - one board post bound to a category and its writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identity; 0 until the post has been persisted.
    pub id: i64,
    /// Owning category, eagerly resolved on load.
    pub category: Category,
    pub title: String,
    /// Set once at creation and never changed afterwards.
    pub writer: Writer,
    pub content: String,
    /// Bumped once per successful single-item read.
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Storage column bound for `content`.
    pub const MAX_CONTENT_LEN: u32 = 4096;

    /// Create a post that has not been persisted yet, bound to a resolved
    /// category and the authoring writer.
    pub fn new(
        category: Category,
        title: impl Into<String>,
        writer: Writer,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            category,
            title: title.into(),
            writer,
            content: content.into(),
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit; the writer stays untouched. Ownership is checked by the
    /// service before this is called.
    pub fn edit(&mut self, title: impl Into<String>, content: impl Into<String>, category: Category) {
        self.title = title.into();
        self.content = content.into();
        self.category = category;
        self.updated_at = Utc::now();
    }

    /// Count one successful read.
    pub fn record_view(&mut self) {
        self.view_count += 1;
    }
}
