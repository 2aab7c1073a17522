//! Authentication infrastructure.

pub mod jwt;

pub use jwt::{JwtConfig, JwtTokenService};
