//! Route authorization middleware.
//!
//! Evaluates the policy table against the request path and whatever identity
//! the authentication middleware attached. Runs after authentication and
//! before any handler. Denials short-circuit with a structured JSON body; the
//! handler never runs.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpMessage, HttpResponse,
};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture, Ready};
use serde::Serialize;
use tracing::warn;

use crate::middleware::jwt_auth::CurrentUser;
use crate::security::policy::{AccessDecision, PolicyTable};

/// Body returned on 401/403 denials.
#[derive(Debug, Serialize)]
struct DenyBody {
    timestamp: String,
    status: u16,
    error: String,
    message: String,
    path: String,
}

/// Authorization middleware factory.
pub struct AuthorizeMiddleware {
    table: Arc<PolicyTable>,
}

impl AuthorizeMiddleware {
    pub fn new(table: Arc<PolicyTable>) -> Self {
        Self { table }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthorizeMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizeMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddlewareService {
            service: Rc::new(service),
            table: self.table.clone(),
        }))
    }
}

pub struct AuthorizeMiddlewareService<S> {
    service: Rc<S>,
    table: Arc<PolicyTable>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let table = Arc::clone(&self.table);

        Box::pin(async move {
            let decision = {
                let extensions = req.extensions();
                let identity = extensions.get::<CurrentUser>().map(|user| &user.0);
                table.decide(req.path(), identity)
            };

            match decision {
                AccessDecision::Allow => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_boxed_body())
                }
                AccessDecision::Unauthorized => {
                    warn!(path = req.path(), "rejecting unauthenticated request");
                    Ok(deny(
                        req,
                        StatusCode::UNAUTHORIZED,
                        "Authentication required. Please provide a valid bearer token.",
                    ))
                }
                AccessDecision::Forbidden => {
                    warn!(path = req.path(), "rejecting request with insufficient role");
                    Ok(deny(
                        req,
                        StatusCode::FORBIDDEN,
                        "Access denied. You don't have sufficient permissions.",
                    ))
                }
            }
        })
    }
}

fn deny(req: ServiceRequest, status: StatusCode, message: &str) -> ServiceResponse<BoxBody> {
    let body = DenyBody {
        timestamp: Utc::now().to_rfc3339(),
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message: message.to_string(),
        path: req.path().to_string(),
    };

    let response = HttpResponse::build(status).json(body);
    req.into_response(response)
}
