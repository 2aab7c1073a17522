//! PostgreSQL storage via SeaORM.

pub mod connections;
pub mod entity;
pub mod store;

#[cfg(test)]
mod tests;

pub use connections::DatabaseConfig;
pub use store::SeaOrmBoardStore;
