use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::rollback;
use crate::domain::Category;
use crate::error::{BoardError, ErrorCode};
use crate::ports::{BoardStore, BoardTx};

/// Input for category create/update.
#[derive(Debug, Clone)]
pub struct CategoryParam {
    pub name: String,
}

/// Pluggable validation hook run before a category is persisted.
///
/// Replacements may extend the rules but must preserve the contract that a
/// blank name fails with `INVALID_CATEGORY_NAME`.
pub trait CategoryChecker: Send + Sync {
    fn check(&self, category: &Category) -> Result<(), BoardError>;
}

/// Default checker: rejects empty or whitespace-only names.
pub struct BlankCategoryChecker;

impl CategoryChecker for BlankCategoryChecker {
    fn check(&self, category: &Category) -> Result<(), BoardError> {
        if category.name.trim().is_empty() {
            warn!(category_id = category.id, "invalid category name");
            return Err(ErrorCode::InvalidCategoryName.into());
        }
        Ok(())
    }
}

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(&self, param: CategoryParam) -> Result<Category, BoardError>;

    async fn update(&self, id: i64, param: CategoryParam) -> Result<Category, BoardError>;

    /// Deletes the category and, through the storage layer, all of its posts.
    async fn delete(&self, id: i64) -> Result<(), BoardError>;

    async fn find_by_id(&self, id: i64) -> Result<Category, BoardError>;

    /// Every category, in storage order.
    async fn find_all(&self) -> Result<Vec<Category>, BoardError>;
}

/// Category CRUD over a [`BoardStore`].
pub struct SimpleCategoryService<S: BoardStore> {
    store: S,
    checker: Arc<dyn CategoryChecker>,
}

impl<S: BoardStore> SimpleCategoryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_checker(store, Arc::new(BlankCategoryChecker))
    }

    pub fn with_checker(store: S, checker: Arc<dyn CategoryChecker>) -> Self {
        Self { store, checker }
    }

    async fn create_in(&self, tx: &mut S::Tx, param: CategoryParam) -> Result<Category, BoardError> {
        let category = Category::new(param.name);
        self.checker.check(&category)?;
        Ok(tx.save_category(category).await?)
    }

    async fn update_in(
        &self,
        tx: &mut S::Tx,
        id: i64,
        param: CategoryParam,
    ) -> Result<Category, BoardError> {
        let mut category = tx.find_category(id).await?.ok_or_else(|| {
            warn!(category_id = id, "update failed: category not found");
            BoardError::new(ErrorCode::NotFoundCategory)
        })?;

        category.rename(param.name);
        self.checker.check(&category)?;

        Ok(tx.save_category(category).await?)
    }

    async fn find_by_id_in(&self, tx: &mut S::Tx, id: i64) -> Result<Category, BoardError> {
        tx.find_category(id).await?.ok_or_else(|| {
            warn!(category_id = id, "find failed: category not found");
            BoardError::new(ErrorCode::NotFoundCategory)
        })
    }

    async fn delete_in(&self, tx: &mut S::Tx, id: i64) -> Result<(), BoardError> {
        let category = tx.find_category(id).await?.ok_or_else(|| {
            warn!(category_id = id, "delete failed: category not found");
            BoardError::new(ErrorCode::NotFoundCategory)
        })?;

        Ok(tx.delete_category(category.id).await?)
    }
}

#[async_trait]
impl<S: BoardStore> CategoryService for SimpleCategoryService<S> {
    async fn create(&self, param: CategoryParam) -> Result<Category, BoardError> {
        info!(name = %param.name, "creating category");

        let mut tx = self.store.begin().await?;
        match self.create_in(&mut tx, param).await {
            Ok(category) => {
                tx.commit().await?;
                info!(category_id = category.id, "category created");
                Ok(category)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn update(&self, id: i64, param: CategoryParam) -> Result<Category, BoardError> {
        info!(category_id = id, "updating category");

        let mut tx = self.store.begin().await?;
        match self.update_in(&mut tx, id, param).await {
            Ok(category) => {
                tx.commit().await?;
                info!(category_id = id, "category updated");
                Ok(category)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<(), BoardError> {
        info!(category_id = id, "deleting category");

        let mut tx = self.store.begin().await?;
        match self.delete_in(&mut tx, id).await {
            Ok(()) => {
                tx.commit().await?;
                info!(category_id = id, "category deleted");
                Ok(())
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Category, BoardError> {
        info!(category_id = id, "finding category");

        let mut tx = self.store.begin().await?;
        match self.find_by_id_in(&mut tx, id).await {
            Ok(category) => {
                tx.commit().await?;
                Ok(category)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn find_all(&self) -> Result<Vec<Category>, BoardError> {
        info!("finding all categories");

        let mut tx = self.store.begin().await?;
        match tx.find_all_categories().await {
            Ok(categories) => {
                tx.commit().await?;
                info!(size = categories.len(), "all categories found");
                Ok(categories)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err.into())
            }
        }
    }
}
