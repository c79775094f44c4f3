/// Tag CRUD handlers
use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::handlers::products::NameQuery;
use crate::models::TagRequest;
use crate::AppState;

/// `POST /api/tags`
pub async fn create_tag(
    state: web::Data<AppState>,
    payload: web::Json<TagRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    info!(name = %payload.name, "creating tag");
    let tag = state.tags.create(payload.into_inner())?;
    Ok(HttpResponse::Created().json(tag))
}

/// `GET /api/tags`
pub async fn list_tags(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.tags.list())
}

/// `GET /api/tags/{id}`
pub async fn get_tag(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let tag = state.tags.get(path.into_inner())?;
    Ok(HttpResponse::Ok().json(tag))
}

/// `PUT /api/tags/{id}`
pub async fn update_tag(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<TagRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = path.into_inner();
    info!(id, "updating tag");
    let tag = state.tags.update(id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(tag))
}

/// `DELETE /api/tags/{id}`
pub async fn delete_tag(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    info!(id, "deleting tag");
    state.tags.delete(id)?;
    state.products.detach_tag(id);
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/tags/by-name?name=`
pub async fn find_tag_by_name(
    state: web::Data<AppState>,
    query: web::Query<NameQuery>,
) -> Result<HttpResponse, AppError> {
    let tag = state.tags.find_by_name(&query.name)?;
    Ok(HttpResponse::Ok().json(tag))
}
