//! Post handlers.
//!
//! Mutations require authentication; the token subject is the writer and
//! ownership is enforced by the service layer. Reads are public.

use actix_web::{HttpRequest, HttpResponse, web};

use board_core::page::PageRequest;
use board_core::service::PostParam;
use board_core::sort::SortOrder;
use board_shared::FieldError;
use board_shared::dto::{PostPageQuery, PostRequest};
use board_shared::response::{PageResponse, PostPreview, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_param(req: PostRequest) -> PostParam {
    PostParam {
        title: req.title,
        content: req.content,
        category_id: req.category_id,
    }
}

/// Boundary validation; collects every blank field, like the service checkers
/// it fronts but with a per-field report.
fn validate(req: &PostRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push(FieldError::new("title", "must not be blank"));
    }
    if req.content.trim().is_empty() {
        errors.push(FieldError::new("content", "must not be blank"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Collect the repeatable `sort` query parameter, e.g.
/// `?sort=title,desc&sort=id`. Malformed entries fail here; whether the
/// property is orderable is the service's call.
fn parse_sort(query_string: &str) -> Result<Vec<SortOrder>, AppError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query_string)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    pairs
        .into_iter()
        .filter(|(key, _)| key == "sort")
        .map(|(_, value)| {
            SortOrder::parse(&value)
                .map_err(|err| AppError::Validation(vec![FieldError::new("sort", err.to_string())]))
        })
        .collect()
}

/// POST /post
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    validate(&body)?;

    let post = state
        .posts
        .create(to_param(body.into_inner()), identity.writer)
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /post/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    validate(&body)?;

    let post = state
        .posts
        .update(
            path.into_inner(),
            to_param(body.into_inner()),
            identity.writer,
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /post/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(path.into_inner(), identity.writer)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /post/{id}
///
/// Every successful read counts a view.
pub async fn find_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// GET /post?categoryId={id}&page={n}&size={n}&sort={property,dir}
pub async fn find_by_category(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PostPageQuery>,
) -> AppResult<HttpResponse> {
    let sort = parse_sort(req.query_string())?;
    let query = query.into_inner();

    let page = state
        .posts
        .find_by_category_id(
            query.category_id,
            PageRequest::with_sort(query.page, query.size, sort),
        )
        .await?;

    Ok(HttpResponse::Ok().json(PageResponse::from_page(page, PostPreview::from)))
}
