//! # Board Infrastructure
//!
//! Concrete implementations of the ports defined in `board-core`:
//! the SeaORM Postgres store, the in-memory fallback store, and the JWT
//! token service.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM

pub mod auth;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(test)]
mod tests;

pub use auth::{JwtConfig, JwtTokenService};
pub use memory::InMemoryBoardStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, SeaOrmBoardStore};
