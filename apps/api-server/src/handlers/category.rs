//! Category handlers.
//!
//! Mutations require the `category:write` scope; reads are public.

use actix_web::{HttpResponse, web};

use board_core::service::CategoryParam;
use board_shared::FieldError;
use board_shared::dto::CategoryRequest;
use board_shared::response::{CategoryResponse, ListResponse};

use crate::middleware::auth::{CATEGORY_WRITE, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Boundary validation; the service checker is the contract of record and
/// stays in place behind this.
fn validate(req: &CategoryRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation(vec![FieldError::new(
            "name",
            "must not be blank",
        )]));
    }
    Ok(())
}

/// POST /category
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_scope(CATEGORY_WRITE)?;
    validate(&body)?;

    let category = state
        .categories
        .create(CategoryParam {
            name: body.into_inner().name,
        })
        .await?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// PUT /category/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_scope(CATEGORY_WRITE)?;
    validate(&body)?;

    let category = state
        .categories
        .update(
            path.into_inner(),
            CategoryParam {
                name: body.into_inner().name,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// DELETE /category/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    identity.require_scope(CATEGORY_WRITE)?;

    state.categories.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /category/{id}
pub async fn find_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let category = state.categories.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// GET /category
pub async fn find_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.find_all().await?;

    Ok(HttpResponse::Ok().json(ListResponse::new(
        categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect(),
    )))
}
