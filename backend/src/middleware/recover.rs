//! Panic recovery middleware.
//!
//! A panicking handler is turned into a plain-text 500 so the worker keeps
//! serving subsequent requests. The 500 travels as an `actix_web::Error`
//! because the inner service owns the request once called.

use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::ContentType;
use actix_web::error::InternalError;
use actix_web::{Error, HttpResponse};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::inbound::http::error::INTERNAL_ERROR_MESSAGE;

/// Middleware converting handler panics into 500 responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use geogate::CatchPanic;
///
/// let app = App::new().wrap(CatchPanic);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CatchPanic;

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = CatchPanicMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchPanicMiddleware { service }))
    }
}

/// Service wrapper produced by [`CatchPanic`].
pub struct CatchPanicMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CatchPanicMiddleware<S>
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
        let method = req.method().clone();
        let path = req.path().to_owned();
        let fut = self.service.call(req);
        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result.map(ServiceResponse::map_into_boxed_body),
                Err(payload) => {
                    let detail = payload
                        .downcast_ref::<&str>()
                        .map(|s| (*s).to_owned())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "non-string panic payload".to_owned());
                    error!(
                        method = %method,
                        path = %path,
                        panic = %detail,
                        "handler panicked"
                    );
                    let response = HttpResponse::InternalServerError()
                        .content_type(ContentType::plaintext())
                        .body(INTERNAL_ERROR_MESSAGE);
                    Err(InternalError::from_response(INTERNAL_ERROR_MESSAGE, response).into())
                }
            }
        })
    }
}
