//! In-memory board store - used as fallback when Postgres is unavailable and
//! as the storage backend of the service test suites.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use board_core::domain::{Category, Post};
use board_core::error::RepoError;
use board_core::page::{Page, PageRequest};
use board_core::ports::{BoardStore, BoardTx};
use board_core::sort::{Direction, NullHandling, SortRegistry};

type PostComparator = fn(&Post, &Post) -> Ordering;

/// Comparator registry for post sorting. Mirrors the column registry of the
/// SeaORM store; none of the registered properties are nullable, so null
/// handling never comes into play here.
static POST_SORT: LazyLock<SortRegistry<PostComparator>> = LazyLock::new(|| {
    // The cast pins T to the fn-pointer type; the remaining closures coerce.
    SortRegistry::new()
        .orderable("id", (|a: &Post, b: &Post| a.id.cmp(&b.id)) as PostComparator)
        .orderable("title", |a, b| a.title.cmp(&b.title))
        .orderable("content", |a, b| a.content.cmp(&b.content))
        .orderable("viewCount", |a, b| a.view_count.cmp(&b.view_count))
        .orderable("createdAt", |a, b| a.created_at.cmp(&b.created_at))
        .orderable("updatedAt", |a, b| a.updated_at.cmp(&b.updated_at))
        .orderable("writer.id", |a, b| a.writer.id.cmp(&b.writer.id))
        .orderable("category.id", |a, b| a.category.id.cmp(&b.category.id))
        .orderable("category.name", |a, b| a.category.name.cmp(&b.category.name))
});

#[derive(Debug, Clone, Default)]
struct MemoryState {
    categories: BTreeMap<i64, Category>,
    posts: BTreeMap<i64, Post>,
    category_seq: i64,
    post_seq: i64,
}

/// In-memory board store.
///
/// Transactions serialize on the state lock: `begin` acquires it for the
/// transaction's lifetime and works on a copy, `commit` writes the copy back,
/// `rollback` (or dropping the transaction) releases the lock and discards
/// the copy. Data is lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<InMemoryTx, RepoError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = (*guard).clone();
        Ok(InMemoryTx { guard, working })
    }
}

/// One transaction over the in-memory state; holds the state lock until
/// commit or rollback.
pub struct InMemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl InMemoryTx {
    /// Re-resolve the embedded category, mirroring the eager join performed
    /// by the relational store on load.
    fn hydrate(&self, mut post: Post) -> Post {
        if let Some(category) = self.working.categories.get(&post.category.id) {
            post.category = category.clone();
        }
        post
    }
}

#[async_trait]
impl BoardTx for InMemoryTx {
    async fn find_category(&mut self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.working.categories.get(&id).cloned())
    }

    async fn category_exists(&mut self, id: i64) -> Result<bool, RepoError> {
        Ok(self.working.categories.contains_key(&id))
    }

    async fn save_category(&mut self, mut category: Category) -> Result<Category, RepoError> {
        if category.id == 0 {
            self.working.category_seq += 1;
            category.id = self.working.category_seq;
        }
        self.working.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete_category(&mut self, id: i64) -> Result<(), RepoError> {
        self.working.categories.remove(&id);
        // Cascade, as the relational schema does through its foreign key.
        self.working.posts.retain(|_, post| post.category.id != id);
        Ok(())
    }

    async fn find_all_categories(&mut self) -> Result<Vec<Category>, RepoError> {
        Ok(self.working.categories.values().cloned().collect())
    }

    async fn find_post(&mut self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self
            .working
            .posts
            .get(&id)
            .cloned()
            .map(|post| self.hydrate(post)))
    }

    async fn save_post(&mut self, mut post: Post) -> Result<Post, RepoError> {
        if post.id == 0 {
            self.working.post_seq += 1;
            post.id = self.working.post_seq;
        }
        self.working.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete_post(&mut self, id: i64) -> Result<(), RepoError> {
        self.working.posts.remove(&id);
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

        let mut posts: Vec<Post> = self
            .working
            .posts
            .values()
            .filter(|post| post.category.id == category_id)
            .cloned()
            .map(|post| self.hydrate(post))
            .collect();

        posts.sort_by(|a, b| {
            for spec in &specs {
                let ord = match spec.direction {
                    Direction::Asc => (spec.target)(a, b),
                    Direction::Desc => (spec.target)(a, b).reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        let total = posts.len() as u64;
        let items = posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();

        Ok(Page { items, total })
    }

    async fn commit(mut self) -> Result<(), RepoError> {
        *self.guard = self.working;
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepoError> {
        Ok(())
    }
}
