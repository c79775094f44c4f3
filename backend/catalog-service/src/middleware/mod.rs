mod authorize;
mod jwt_auth;

pub use authorize::AuthorizeMiddleware;
pub use jwt_auth::{CurrentUser, JwtAuthMiddleware};
