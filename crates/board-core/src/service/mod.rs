//! Category and post services.
//!
//! Each public operation runs inside one scoped storage transaction: begin,
//! run the body, commit on success, roll back on any error.

mod category;
mod post;

pub use category::{
    BlankCategoryChecker, CategoryChecker, CategoryParam, CategoryService, SimpleCategoryService,
};
pub use post::{BlankPostChecker, PostChecker, PostParam, PostService, SimplePostService};

use crate::ports::BoardTx;

/// Roll back a transaction, logging (not propagating) a rollback failure so
/// the original error stays the one surfaced to the caller.
pub(crate) async fn rollback<T: BoardTx>(tx: T) {
    if let Err(err) = tx.rollback().await {
        tracing::error!(error = %err, "transaction rollback failed");
    }
}
