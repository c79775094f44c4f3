//! Bearer-token authentication middleware.
//!
//! Runs once per request, before authorization. On a valid token it attaches
//! the decoded [`Identity`] to the request extensions; on anything else
//! (missing header, wrong scheme, malformed/forged/expired token) it leaves
//! the request unauthenticated and forwards it unchanged. Producing 401s is
//! the authorization middleware's job, never this one's.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::error::AppError;
use crate::security::identity::Identity;
use crate::security::jwt::TokenCodec;

/// Identity attached to the request extensions after successful validation.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

/// JWT authentication middleware factory.
pub struct JwtAuthMiddleware {
    codec: Arc<TokenCodec>,
}

impl JwtAuthMiddleware {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            codec: self.codec.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    codec: Arc<TokenCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let codec = Arc::clone(&self.codec);

        Box::pin(async move {
            if let Some(identity) = authenticate_request(&codec, &req) {
                // Never overwrite an identity attached by an earlier pass.
                if req.extensions().get::<CurrentUser>().is_none() {
                    req.extensions_mut().insert(CurrentUser(identity));
                }
            }

            service.call(req).await
        })
    }
}

/// Extract and validate a bearer token, if the request carries one.
fn authenticate_request(codec: &TokenCodec, req: &ServiceRequest) -> Option<Identity> {
    let auth_header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;

    match codec.validate(token, Utc::now()) {
        Ok(identity) => {
            debug!(username = %identity.username, "bearer token accepted");
            Some(identity)
        }
        Err(err) => {
            debug!(%err, "bearer token rejected");
            None
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => ready(Err(AppError::Unauthenticated)),
        }
    }
}
