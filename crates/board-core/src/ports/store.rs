//! Storage ports - transactional access to categories and posts.

use async_trait::async_trait;

use crate::domain::{Category, Post};
use crate::error::RepoError;
use crate::page::{Page, PageRequest};

/// Storage engine port.
///
/// `begin` opens one scoped transaction. Every service operation runs inside
/// exactly one transaction that commits on success and rolls back on any
/// error, including validation failures raised mid-operation.
#[async_trait]
pub trait BoardStore: Send + Sync + 'static {
    type Tx: BoardTx;

    async fn begin(&self) -> Result<Self::Tx, RepoError>;
}

/// Operations available inside one storage transaction.
#[async_trait]
pub trait BoardTx: Send {
    async fn find_category(&mut self, id: i64) -> Result<Option<Category>, RepoError>;

    async fn category_exists(&mut self, id: i64) -> Result<bool, RepoError>;

    /// Insert when `id == 0`, update otherwise. Returns the stored entity
    /// with its server-assigned identity.
    async fn save_category(&mut self, category: Category) -> Result<Category, RepoError>;

    /// Delete the category; the storage layer cascades to dependent posts.
    async fn delete_category(&mut self, id: i64) -> Result<(), RepoError>;

    /// All categories in storage order.
    async fn find_all_categories(&mut self) -> Result<Vec<Category>, RepoError>;

    /// Load a post with its category eagerly resolved.
    async fn find_post(&mut self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Insert when `id == 0`, update otherwise.
    async fn save_post(&mut self, post: Post) -> Result<Post, RepoError>;

    async fn delete_post(&mut self, id: i64) -> Result<(), RepoError>;

    /// One page of the category's posts ordered by the request's sort spec,
    /// plus the total matching count. Fails with
    /// [`RepoError::UnknownSortProperty`] when the spec names a property
    /// outside the post sort registry.
    async fn find_posts_by_category(
        &mut self,
        category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    async fn commit(self) -> Result<(), RepoError>;

    async fn rollback(self) -> Result<(), RepoError>;
}
