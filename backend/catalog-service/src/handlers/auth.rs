/// Authentication handlers
use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{AuthResponse, LoginRequest, UserInfoResponse};
use crate::AppState;

/// `POST /auth/login` — verify credentials and issue a bearer token.
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    info!(username = %payload.username, "login attempt");

    let identity = match state
        .authenticator
        .authenticate(&payload.username, &payload.password)
    {
        Ok(identity) => identity,
        Err(err) => {
            warn!(username = %payload.username, "login failed");
            return Err(err);
        }
    };

    let token = state.token_codec.issue(&identity, Utc::now())?;

    info!(username = %identity.username, "login successful");

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        token_type: "Bearer".to_string(),
        username: identity.username,
        roles: identity.roles,
        expires_in: state.token_codec.validity().num_milliseconds(),
    }))
}

/// `GET /auth/me` — the identity carried by the presented token.
pub async fn me(user: CurrentUser) -> HttpResponse {
    let CurrentUser(identity) = user;
    HttpResponse::Ok().json(UserInfoResponse {
        username: identity.username,
        roles: identity.roles,
    })
}
