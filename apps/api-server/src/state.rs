//! Application state - shared across all handlers.

use std::sync::Arc;

use board_core::service::{
    CategoryService, PostService, SimpleCategoryService, SimplePostService,
};
use board_infra::InMemoryBoardStore;

#[cfg(feature = "postgres")]
use board_infra::database::SeaOrmBoardStore;

use crate::config::DatabaseConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryService>,
    pub posts: Arc<dyn PostService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match config.connect().await {
                    Ok(db) => {
                        tracing::info!("Application state initialized (postgres store)");
                        let store = SeaOrmBoardStore::new(db);
                        return Self {
                            categories: Arc::new(SimpleCategoryService::new(store.clone())),
                            posts: Arc::new(SimplePostService::new(store)),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        let _ = db_config;

        let store = InMemoryBoardStore::new();
        tracing::info!("Application state initialized (in-memory store)");
        Self {
            categories: Arc::new(SimpleCategoryService::new(store.clone())),
            posts: Arc::new(SimplePostService::new(store)),
        }
    }
}
