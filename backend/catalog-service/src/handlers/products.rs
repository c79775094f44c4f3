/// Product CRUD handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::models::ProductRequest;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// `POST /api/products`
pub async fn create_product(
    state: web::Data<AppState>,
    payload: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    info!(name = %payload.name, "creating product");
    let product = state.products.create(payload.into_inner())?;
    Ok(HttpResponse::Created().json(product))
}

/// `GET /api/products`
pub async fn list_products(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.products.list())
}

/// `GET /api/products/{id}`
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product = state.products.get(path.into_inner())?;
    Ok(HttpResponse::Ok().json(product))
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = path.into_inner();
    info!(id, "updating product");
    let product = state.products.update(id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    info!(id, "deleting product");
    state.products.delete(id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/products/search?name=`
pub async fn search_products(
    state: web::Data<AppState>,
    query: web::Query<NameQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.products.search_by_name(&query.name))
}

/// `GET /api/products/by-tag?name=`
pub async fn products_by_tag(
    state: web::Data<AppState>,
    query: web::Query<NameQuery>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.find_by_tag_name(&query.name)?;
    Ok(HttpResponse::Ok().json(products))
}

/// `POST /api/products/{id}/tags/{tag_id}`
pub async fn add_tag_to_product(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (product_id, tag_id) = path.into_inner();
    info!(product_id, tag_id, "attaching tag to product");
    let product = state.products.add_tag(product_id, tag_id)?;
    Ok(HttpResponse::Ok().json(product))
}

/// `DELETE /api/products/{id}/tags/{tag_id}`
pub async fn remove_tag_from_product(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (product_id, tag_id) = path.into_inner();
    info!(product_id, tag_id, "detaching tag from product");
    let product = state.products.remove_tag(product_id, tag_id)?;
    Ok(HttpResponse::Ok().json(product))
}
