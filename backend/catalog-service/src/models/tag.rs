use serde::{Deserialize, Serialize};
use validator::Validate;

/// A tag that can be attached to any number of products.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Create/update payload for tags.
#[derive(Debug, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Tag name must be between 2 and 50 characters"
    ))]
    pub name: String,
}
