pub mod auth;
pub mod product;
pub mod tag;

pub use auth::{AuthResponse, LoginRequest, UserInfoResponse};
pub use product::{Product, ProductRequest};
pub use tag::{Tag, TagRequest};
