//! Authentication and authorization ports.

/// Claims extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Opaque subject; becomes the writer id for post mutations.
    pub subject: String,
    pub scopes: Vec<String>,
    pub exp: i64,
}

impl TokenClaims {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a subject with the given scopes.
    fn issue_token(&self, subject: &str, scopes: &[&str]) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("missing required scope: {0}")]
    InsufficientScope(String),
}
