#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test, web, App, Error,
};
use chrono::Duration;
use serde_json::json;

use catalog_service::middleware::{AuthorizeMiddleware, JwtAuthMiddleware};
use catalog_service::routes::configure_routes;
use catalog_service::security::authenticator::{Authenticator, InMemoryUserStore};
use catalog_service::security::jwt::TokenCodec;
use catalog_service::security::policy::catalog_policies;
use catalog_service::services::{ProductService, TagService};
use catalog_service::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_state() -> AppState {
    let token_codec = Arc::new(TokenCodec::new(TEST_SECRET, Duration::hours(24)));
    let user_store = Arc::new(InMemoryUserStore::seeded().expect("seed users"));
    let authenticator = Arc::new(Authenticator::new(user_store));
    let tags = Arc::new(TagService::new());
    let products = Arc::new(ProductService::new(tags.clone()));

    AppState {
        token_codec,
        authenticator,
        products,
        tags,
    }
}

/// The application as `main` assembles it: authentication first, then
/// authorization, then the routes.
pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let codec = state.token_codec.clone();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(AuthorizeMiddleware::new(Arc::new(catalog_policies())))
            .wrap(JwtAuthMiddleware::new(codec))
            .configure(configure_routes),
    )
    .await
}

pub async fn login_token<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(app, req).await;
    body["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
