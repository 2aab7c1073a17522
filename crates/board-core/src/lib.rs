//! # Board Core
//!
//! The domain layer of the board backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the error taxonomy, sort-field validation, pagination types, and
//! the category/post services behind storage ports.

pub mod domain;
pub mod error;
pub mod page;
pub mod ports;
pub mod service;
pub mod sort;

pub use error::{BoardError, ErrorCode};
