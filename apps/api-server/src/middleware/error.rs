//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use std::fmt;

use board_core::error::{BoardError, ErrorCode};
use board_shared::{ErrorResponse, FieldError};

use super::auth::AuthenticationError;

/// Application-level error type that converts to RFC 7807 responses.
///
/// Business failures carry their own status and code; everything else is a
/// boundary concern mapped to 400.
#[derive(Debug)]
pub enum AppError {
    Board(BoardError),
    BadRequest(String),
    Validation(Vec<FieldError>),
    Auth(AuthenticationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Board(err) => write!(f, "{}", err),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation failed: {} field(s)", errors.len()),
            AppError::Auth(err) => write!(f, "{}", err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Board(err) => StatusCode::from_u16(err.code.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(err) => err.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Board(err) => {
                // Storage failures were normalized to UNKNOWN_ERROR; the
                // original cause is logged here and never sent to clients.
                if err.code == ErrorCode::UnknownError {
                    tracing::error!(detail = ?err.detail, "unhandled error");
                }
                ErrorResponse::new(err.code.status(), err.code.name(), err.code.to_string())
            }
            AppError::BadRequest(detail) => {
                ErrorResponse::new(400, "INVALID_REQUEST", "invalid request")
                    .with_detail(detail.clone())
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(400, "INVALID_REQUEST", "invalid request")
                    .with_field_errors(errors.clone())
            }
            AppError::Auth(err) => return err.error_response(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        AppError::Board(err)
    }
}

impl From<AuthenticationError> for AppError {
    fn from(err: AuthenticationError) -> Self {
        AppError::Auth(err)
    }
}

/// JSON extractor configuration: malformed bodies get the same RFC 7807
/// shape as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
