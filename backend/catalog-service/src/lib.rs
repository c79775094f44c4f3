// Catalog Service Library

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

pub use error::{AppError, Result};

use std::sync::Arc;

use crate::security::authenticator::Authenticator;
use crate::security::jwt::TokenCodec;
use crate::services::{ProductService, TagService};

/// Shared application state, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub token_codec: Arc<TokenCodec>,
    pub authenticator: Arc<Authenticator>,
    pub products: Arc<ProductService>,
    pub tags: Arc<TagService>,
}
