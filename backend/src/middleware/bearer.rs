//! Bearer token gate for protected routes.
//!
//! Requests must carry `Authorization: Bearer <token>`. Verified claims are
//! stored in request extensions, where handlers read them through
//! `web::ReqData<TokenClaims>`. Anything else is answered with 403.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error as DomainError;
use crate::domain::ports::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

/// Message returned when a token is absent or rejected.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Middleware admitting only requests with a valid bearer token.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use geogate::RequireBearer;
/// use geogate::outbound::security::{JwtTokenService, JwtTokenServiceConfig};
///
/// let tokens = Arc::new(JwtTokenService::new(JwtTokenServiceConfig::new("secret")));
/// let app = App::new().service(web::scope("/api/account").wrap(RequireBearer::new(tokens)));
/// ```
#[derive(Clone)]
pub struct RequireBearer {
    tokens: Arc<dyn TokenService>,
}

impl RequireBearer {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireBearer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireBearerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireBearerMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Service wrapper produced by [`RequireBearer`].
pub struct RequireBearerMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenService>,
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S, B> Service<ServiceRequest> for RequireBearerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verified = match bearer_token(&req) {
            Some(token) => self.tokens.verify(token).map_err(|err| {
                debug!(error = %err, path = %req.path(), "bearer token rejected");
            }),
            None => {
                debug!(path = %req.path(), "bearer token missing");
                Err(())
            }
        };

        match verified {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_boxed_body)
                })
            }
            Err(()) => {
                let response = DomainError::forbidden(INVALID_TOKEN_MESSAGE).error_response();
                Box::pin(ready(Ok(req.into_response(response))))
            }
        }
    }
}
