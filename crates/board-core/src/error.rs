//! Domain-level error types.

use thiserror::Error;

/// Enumerated business error kinds.
///
/// Each kind carries a default message (its `Display` impl) and a fixed HTTP
/// status the boundary maps it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    #[error("invalid category name")]
    InvalidCategoryName,

    #[error("invalid post title")]
    InvalidPostTitle,

    #[error("invalid post content")]
    InvalidPostContent,

    #[error("invalid post category")]
    InvalidPostCategory,

    #[error("invalid post sort property")]
    InvalidPostSortProperty,

    #[error("not the writer of the post")]
    NotPostOwner,

    #[error("category not found")]
    NotFoundCategory,

    #[error("post not found")]
    NotFoundPost,

    #[error("an unknown error occurred")]
    UnknownError,
}

impl ErrorCode {
    /// Machine-readable kind carried in error responses.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCategoryName => "INVALID_CATEGORY_NAME",
            ErrorCode::InvalidPostTitle => "INVALID_POST_TITLE",
            ErrorCode::InvalidPostContent => "INVALID_POST_CONTENT",
            ErrorCode::InvalidPostCategory => "INVALID_POST_CATEGORY",
            ErrorCode::InvalidPostSortProperty => "INVALID_POST_SORT_PROPERTY",
            ErrorCode::NotPostOwner => "NOT_POST_OWNER",
            ErrorCode::NotFoundCategory => "NOT_FOUND_CATEGORY",
            ErrorCode::NotFoundPost => "NOT_FOUND_POST",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// HTTP status for this kind.
    ///
    /// `InvalidPostTitle` maps to 400 while the other field validations map
    /// to 403; the asymmetry is part of the published contract.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::InvalidPostTitle => 400,
            ErrorCode::InvalidCategoryName
            | ErrorCode::InvalidPostContent
            | ErrorCode::InvalidPostCategory
            | ErrorCode::InvalidPostSortProperty
            | ErrorCode::NotPostOwner => 403,
            ErrorCode::NotFoundCategory | ErrorCode::NotFoundPost => 404,
            ErrorCode::UnknownError => 500,
        }
    }
}

/// Business failure raised by the services.
#[derive(Debug, Error)]
#[error("{code}")]
pub struct BoardError {
    pub code: ErrorCode,
    /// Extra context kept for logging; never rendered to clients verbatim.
    pub detail: Option<String>,
}

impl BoardError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code, detail: None }
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }
}

impl From<ErrorCode> for BoardError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Storage failures outside the error taxonomy are normalized to
/// `UNKNOWN_ERROR`; the original failure is preserved for logging only.
impl From<RepoError> for BoardError {
    fn from(err: RepoError) -> Self {
        Self::with_detail(ErrorCode::UnknownError, err.to_string())
    }
}

/// Storage port errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    /// The requested sort property is not in the entity's sort registry.
    #[error("unknown sort property: {0}")]
    UnknownSortProperty(String),
}
