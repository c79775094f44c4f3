use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use chrono::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use catalog_service::config::Config;
use catalog_service::middleware::{AuthorizeMiddleware, JwtAuthMiddleware};
use catalog_service::routes::configure_routes;
use catalog_service::security::authenticator::{Authenticator, InMemoryUserStore};
use catalog_service::security::jwt::TokenCodec;
use catalog_service::security::policy::catalog_policies;
use catalog_service::services::{ProductService, TagService};
use catalog_service::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration from environment")?;

    tracing::info!(
        host = %config.server_host,
        port = config.server_port,
        "starting catalog service"
    );

    // Explicit construction in dependency order: secret → codec, store →
    // authenticator, then the per-request pipeline on top of both.
    let token_codec = Arc::new(TokenCodec::new(
        &config.jwt_secret,
        Duration::milliseconds(config.jwt_expiration_ms),
    ));
    let user_store = Arc::new(InMemoryUserStore::seeded().context("failed to seed user store")?);
    let authenticator = Arc::new(Authenticator::new(user_store));
    let policies = Arc::new(catalog_policies());

    let tags = Arc::new(TagService::new());
    let products = Arc::new(ProductService::new(tags.clone()));

    let state = AppState {
        token_codec: token_codec.clone(),
        authenticator,
        products,
        tags,
    };

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            // actix runs the middleware registered last first: request
            // logging, then authentication, then authorization.
            .wrap(AuthorizeMiddleware::new(policies.clone()))
            .wrap(JwtAuthMiddleware::new(token_codec.clone()))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
