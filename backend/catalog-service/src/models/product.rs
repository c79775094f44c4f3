use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::tag::Tag;

/// A catalog product with its attached tags.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tags: Vec<Tag>,
}

/// Create/update payload for products.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Product name must be between 2 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}
