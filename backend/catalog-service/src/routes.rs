//! Route configuration
//!
//! Paths are grouped into the same scopes the policy table guards. Literal
//! segments are registered before `{id}` so `/search` and friends are not
//! swallowed by the id matcher.

use actix_web::web;

use crate::handlers;

/// Configure all routes for the application.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(handlers::login))
                .route("/me", web::get().to(handlers::me)),
        )
        .service(
            web::scope("/api/admin")
                .route("/stats", web::get().to(handlers::admin_stats))
                .route("/info", web::get().to(handlers::admin_info)),
        )
        .service(
            web::scope("/api/products")
                .route("", web::post().to(handlers::create_product))
                .route("", web::get().to(handlers::list_products))
                .route("/search", web::get().to(handlers::search_products))
                .route("/by-tag", web::get().to(handlers::products_by_tag))
                .route("/{id}", web::get().to(handlers::get_product))
                .route("/{id}", web::put().to(handlers::update_product))
                .route("/{id}", web::delete().to(handlers::delete_product))
                .route(
                    "/{id}/tags/{tag_id}",
                    web::post().to(handlers::add_tag_to_product),
                )
                .route(
                    "/{id}/tags/{tag_id}",
                    web::delete().to(handlers::remove_tag_from_product),
                ),
        )
        .service(
            web::scope("/api/tags")
                .route("", web::post().to(handlers::create_tag))
                .route("", web::get().to(handlers::list_tags))
                .route("/by-name", web::get().to(handlers::find_tag_by_name))
                .route("/{id}", web::get().to(handlers::get_tag))
                .route("/{id}", web::put().to(handlers::update_tag))
                .route("/{id}", web::delete().to(handlers::delete_tag)),
        );
}
