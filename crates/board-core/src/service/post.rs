use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::rollback;
use crate::domain::{Category, Post, Writer};
use crate::error::{BoardError, ErrorCode, RepoError};
use crate::page::{Page, PageRequest};
use crate::ports::{BoardStore, BoardTx};

/// Input for post create/update.
#[derive(Debug, Clone)]
pub struct PostParam {
    pub title: String,
    pub content: String,
    pub category_id: i64,
}

/// Pluggable validation hook run before a post is persisted.
///
/// Replacements must preserve the contract that a blank title fails with
/// `INVALID_POST_TITLE` and a blank content with `INVALID_POST_CONTENT`,
/// title checked first.
pub trait PostChecker: Send + Sync {
    fn check(&self, post: &Post) -> Result<(), BoardError>;
}

/// Default checker: rejects blank titles, then blank contents.
pub struct BlankPostChecker;

impl PostChecker for BlankPostChecker {
    fn check(&self, post: &Post) -> Result<(), BoardError> {
        if post.title.trim().is_empty() {
            warn!(post_id = post.id, writer_id = %post.writer.id, "invalid post title");
            return Err(ErrorCode::InvalidPostTitle.into());
        }
        if post.content.trim().is_empty() {
            warn!(post_id = post.id, writer_id = %post.writer.id, "invalid post content");
            return Err(ErrorCode::InvalidPostContent.into());
        }
        Ok(())
    }
}

#[async_trait]
pub trait PostService: Send + Sync {
    async fn create(&self, param: PostParam, writer: Writer) -> Result<Post, BoardError>;

    /// Only the original writer may update. Checked before the category and
    /// field validations.
    async fn update(&self, id: i64, param: PostParam, writer: Writer) -> Result<Post, BoardError>;

    /// Only the original writer may delete.
    async fn delete(&self, id: i64, writer: Writer) -> Result<(), BoardError>;

    /// Increments the view count as a side effect of every successful read;
    /// not guarded by ownership.
    async fn find_by_id(&self, id: i64) -> Result<Post, BoardError>;

    /// Paginated posts of one category, ordered per the request's sort spec.
    async fn find_by_category_id(
        &self,
        category_id: i64,
        page: PageRequest,
    ) -> Result<Page<Post>, BoardError>;
}

/// Post CRUD over a [`BoardStore`].
pub struct SimplePostService<S: BoardStore> {
    store: S,
    checker: Arc<dyn PostChecker>,
}

impl<S: BoardStore> SimplePostService<S> {
    pub fn new(store: S) -> Self {
        Self::with_checker(store, Arc::new(BlankPostChecker))
    }

    pub fn with_checker(store: S, checker: Arc<dyn PostChecker>) -> Self {
        Self { store, checker }
    }

    /// Resolve the referenced category; an unresolvable reference is a
    /// validation failure, not a not-found.
    async fn resolve_category(&self, tx: &mut S::Tx, category_id: i64) -> Result<Category, BoardError> {
        tx.find_category(category_id).await?.ok_or_else(|| {
            warn!(category_id, "category validation failed");
            BoardError::new(ErrorCode::InvalidPostCategory)
        })
    }

    async fn create_in(
        &self,
        tx: &mut S::Tx,
        param: PostParam,
        writer: Writer,
    ) -> Result<Post, BoardError> {
        let category = self.resolve_category(tx, param.category_id).await?;

        let post = Post::new(category, param.title, writer, param.content);
        self.checker.check(&post)?;

        Ok(tx.save_post(post).await?)
    }

    async fn update_in(
        &self,
        tx: &mut S::Tx,
        id: i64,
        param: PostParam,
        writer: Writer,
    ) -> Result<Post, BoardError> {
        let mut post = tx.find_post(id).await?.ok_or_else(|| {
            warn!(post_id = id, "update failed: post not found");
            BoardError::new(ErrorCode::NotFoundPost)
        })?;

        if post.writer != writer {
            warn!(post_id = id, writer_id = %writer.id, "update denied: not owner");
            return Err(ErrorCode::NotPostOwner.into());
        }

        let category = self.resolve_category(tx, param.category_id).await?;
        post.edit(param.title, param.content, category);
        self.checker.check(&post)?;

        Ok(tx.save_post(post).await?)
    }

    async fn delete_in(&self, tx: &mut S::Tx, id: i64, writer: Writer) -> Result<(), BoardError> {
        let post = tx.find_post(id).await?.ok_or_else(|| {
            warn!(post_id = id, "delete failed: post not found");
            BoardError::new(ErrorCode::NotFoundPost)
        })?;

        if post.writer != writer {
            warn!(post_id = id, writer_id = %writer.id, "delete denied: not owner");
            return Err(ErrorCode::NotPostOwner.into());
        }

        Ok(tx.delete_post(post.id).await?)
    }

    async fn find_by_id_in(&self, tx: &mut S::Tx, id: i64) -> Result<Post, BoardError> {
        let mut post = tx.find_post(id).await?.ok_or_else(|| {
            warn!(post_id = id, "find failed: post not found");
            BoardError::new(ErrorCode::NotFoundPost)
        })?;

        post.record_view();
        Ok(tx.save_post(post).await?)
    }

    async fn find_by_category_id_in(
        &self,
        tx: &mut S::Tx,
        category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Post>, BoardError> {
        if !tx.category_exists(category_id).await? {
            warn!(category_id, "find posts failed: category not found");
            return Err(ErrorCode::NotFoundCategory.into());
        }

        match tx.find_posts_by_category(category_id, page).await {
            Ok(page) => Ok(page),
            Err(RepoError::UnknownSortProperty(property)) => {
                warn!(category_id, %property, "invalid sort property");
                Err(BoardError::with_detail(
                    ErrorCode::InvalidPostSortProperty,
                    property,
                ))
            }
            Err(other) => Err(other.into()),
        }
    }
}

#[async_trait]
impl<S: BoardStore> PostService for SimplePostService<S> {
    async fn create(&self, param: PostParam, writer: Writer) -> Result<Post, BoardError> {
        info!(writer_id = %writer.id, title = %param.title, "creating post");

        let mut tx = self.store.begin().await?;
        match self.create_in(&mut tx, param, writer).await {
            Ok(post) => {
                tx.commit().await?;
                info!(post_id = post.id, "post created");
                Ok(post)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn update(&self, id: i64, param: PostParam, writer: Writer) -> Result<Post, BoardError> {
        info!(post_id = id, writer_id = %writer.id, "updating post");

        let mut tx = self.store.begin().await?;
        match self.update_in(&mut tx, id, param, writer).await {
            Ok(post) => {
                tx.commit().await?;
                info!(post_id = id, "post updated");
                Ok(post)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn delete(&self, id: i64, writer: Writer) -> Result<(), BoardError> {
        info!(post_id = id, writer_id = %writer.id, "deleting post");

        let mut tx = self.store.begin().await?;
        match self.delete_in(&mut tx, id, writer).await {
            Ok(()) => {
                tx.commit().await?;
                info!(post_id = id, "post deleted");
                Ok(())
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, BoardError> {
        info!(post_id = id, "finding post");

        // Not a read-only path: the view count is written back.
        let mut tx = self.store.begin().await?;
        match self.find_by_id_in(&mut tx, id).await {
            Ok(post) => {
                tx.commit().await?;
                Ok(post)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn find_by_category_id(
        &self,
        category_id: i64,
        page: PageRequest,
    ) -> Result<Page<Post>, BoardError> {
        info!(category_id, page = page.page, "finding posts by category");

        let mut tx = self.store.begin().await?;
        match self.find_by_category_id_in(&mut tx, category_id, &page).await {
            Ok(page) => {
                tx.commit().await?;
                Ok(page)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }
}
