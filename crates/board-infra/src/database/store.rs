//! SeaORM-backed board store.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use sea_orm::sea_query::{NullOrdering, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbConn, EntityTrait, IntoSimpleExpr,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use board_core::domain::{Category, Post, Writer};
use board_core::error::RepoError;
use board_core::page::{Page, PageRequest};
use board_core::ports::{BoardStore, BoardTx};
use board_core::sort::{Direction, NullHandling, SortRegistry};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};

/// Column registry for post sorting. Nested paths resolve into the joined
/// category table; everything else orders on the posts table directly.
static POST_SORT: LazyLock<SortRegistry<SimpleExpr>> = LazyLock::new(|| {
    SortRegistry::new()
        .orderable("id", post::Column::Id.into_simple_expr())
        .orderable("title", post::Column::Title.into_simple_expr())
        .orderable("content", post::Column::Content.into_simple_expr())
        .orderable("viewCount", post::Column::ViewCount.into_simple_expr())
        .orderable("createdAt", post::Column::CreatedAt.into_simple_expr())
        .orderable("updatedAt", post::Column::UpdatedAt.into_simple_expr())
        .orderable("writer.id", post::Column::WriterId.into_simple_expr())
        .orderable("category.id", post::Column::CategoryId.into_simple_expr())
        .orderable("category.name", category::Column::Name.into_simple_expr())
});

/// PostgreSQL board store. Clones share the underlying connection pool.
#[derive(Clone)]
pub struct SeaOrmBoardStore {
    db: Arc<DbConn>,
}

impl SeaOrmBoardStore {
    pub fn new(db: DbConn) -> Self {
        Self { db: Arc::new(db) }
    }
}

#[async_trait]
impl BoardStore for SeaOrmBoardStore {
    type Tx = SeaOrmTx;

    async fn begin(&self) -> Result<SeaOrmTx, RepoError> {
        let tx = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        Ok(SeaOrmTx { tx })
    }
}

/// One database transaction.
pub struct SeaOrmTx {
    tx: DatabaseTransaction,
}

#[async_trait]
impl BoardTx for SeaOrmTx {
    async fn find_category(&mut self, id: i64) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find_by_id(id)
            .one(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn category_exists(&mut self, id: i64) -> Result<bool, RepoError> {
        let count = CategoryEntity::find_by_id(id)
            .count(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(count > 0)
    }

    async fn save_category(&mut self, category: Category) -> Result<Category, RepoError> {
        let insert = category.id == 0;
        let active: category::ActiveModel = category.into();

        let model = if insert {
            active.insert(&self.tx).await
        } else {
            active.update(&self.tx).await
        }
        .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.into())
    }

    async fn delete_category(&mut self, id: i64) -> Result<(), RepoError> {
        // Dependent posts go with it through the ON DELETE CASCADE key.
        CategoryEntity::delete_by_id(id)
            .exec(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_all_categories(&mut self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .all(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_post(&mut self, id: i64) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match result {
            None => Ok(None),
            Some((model, Some(cat))) => Ok(Some(model.into_domain(cat))),
            Some((model, None)) => Err(RepoError::Query(format!(
                "post {} has no category row",
                model.id
            ))),
        }
    }

    async fn save_post(&mut self, post: Post) -> Result<Post, RepoError> {
        let insert = post.id == 0;
        let category = post.category.clone();
        let active: post::ActiveModel = post.into();

        let model = if insert {
            active.insert(&self.tx).await
        } else {
            active.update(&self.tx).await
        }
        .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Post {
            id: model.id,
            category,
            title: model.title,
            writer: Writer {
                id: model.writer_id,
            },
            content: model.content,
            view_count: model.view_count,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }

    async fn delete_post(&mut self, id: i64) -> Result<(), RepoError> {
        PostEntity::delete_by_id(id)
            .exec(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_posts_by_category(
        &mut self,
        category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let specs = POST_SORT
            .resolve(&page.sort, NullHandling::Database)
            .map_err(|err| RepoError::UnknownSortProperty(err.0))?;

        let filter = post::Column::CategoryId.eq(category_id);

        let total = PostEntity::find()
            .filter(filter.clone())
            .count(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut query = PostEntity::find()
            .find_also_related(CategoryEntity)
            .filter(filter);

        for spec in specs {
            let order = match spec.direction {
                Direction::Asc => Order::Asc,
                Direction::Desc => Order::Desc,
            };
            query = match spec.nulls {
                NullHandling::Database => query.order_by(spec.target, order),
                NullHandling::NullsFirst => {
                    query.order_by_with_nulls(spec.target, order, NullOrdering::First)
                }
                NullHandling::NullsLast => {
                    query.order_by_with_nulls(spec.target, order, NullOrdering::Last)
                }
            };
        }

        let rows = query
            .offset(page.offset())
            .limit(page.size)
            .all(&self.tx)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let items = rows
            .into_iter()
            .map(|(model, cat)| {
                let cat = cat.ok_or_else(|| {
                    RepoError::Query(format!("post {} has no category row", model.id))
                })?;
                Ok(model.into_domain(cat))
            })
            .collect::<Result<Vec<Post>, RepoError>>()?;

        Ok(Page { items, total })
    }

    async fn commit(self) -> Result<(), RepoError> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn rollback(self) -> Result<(), RepoError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}
