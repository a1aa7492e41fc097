//! Login gate for routes that only the signed-in author may use.
//!
//! Wrap a route with [`LoginRequired`] and anonymous requests are answered
//! with `401 Unauthorized` before the handler runs:
//!
//! ```json
//! {"code":"unauthorized","message":"Please log in.","traceId":"..."}
//! ```
//!
//! The wrapped handler keeps its own signature; nothing about the gate leaks
//! into its arguments.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::session::{LOGIN_REQUIRED_MESSAGE, SessionContext};

/// Middleware factory rejecting requests without a logged-in session.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use flaskr::inbound::http::gate::LoginRequired;
///
/// let app = App::new().service(
///     web::resource("/add")
///         .wrap(LoginRequired)
///         .route(web::post().to(HttpResponse::Ok)),
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoginRequired;

impl<S, B> Transform<S, ServiceRequest> for LoginRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = LoginRequiredMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRequiredMiddleware { service }))
    }
}

/// Service wrapper produced by [`LoginRequired`].
pub struct LoginRequiredMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LoginRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if SessionContext::from_service_request(&req).is_logged_in() {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        debug!(path = %req.path(), "rejecting anonymous request to gated route");
        let error = Error::unauthorized(LOGIN_REQUIRED_MESSAGE);
        let response = req
            .into_response(error.error_response())
            .map_into_right_body();
        Box::pin(ready(Ok(response)))
    }
}
