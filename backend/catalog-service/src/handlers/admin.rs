/// Admin-only handlers
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::middleware::CurrentUser;
use crate::AppState;

/// `GET /api/admin/stats`
pub async fn admin_stats(state: web::Data<AppState>, user: CurrentUser) -> HttpResponse {
    info!(admin = %user.0.username, "admin stats requested");

    HttpResponse::Ok().json(json!({
        "timestamp": Utc::now().to_rfc3339(),
        "admin": user.0.username,
        "totalProducts": state.products.count(),
        "totalTags": state.tags.count(),
    }))
}

/// `GET /api/admin/info`
pub async fn admin_info(user: CurrentUser) -> HttpResponse {
    info!(admin = %user.0.username, "admin info requested");

    HttpResponse::Ok().json(json!({
        "timestamp": Utc::now().to_rfc3339(),
        "admin": user.0.username,
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
