use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login response: the bearer token plus everything the client
/// needs to use it.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: String,
    pub roles: Vec<String>,
    /// Validity window in milliseconds.
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub username: String,
    pub roles: Vec<String>,
}
