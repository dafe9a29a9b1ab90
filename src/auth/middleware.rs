use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{authenticate, AuthStage, TokenService};

/// Guards every route of the scope it wraps.
///
/// A request whose `Authorization` header does not carry a valid bearer token
/// is answered with 401 and the inner service is never called. Otherwise the
/// verified [`Identity`](crate::auth::Identity) is inserted into the request
/// extensions.
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = authenticate(
            &self.tokens,
            "http",
            req.headers()
                .get(header::AUTHORIZATION)
                .map(|value| value.as_bytes()),
        );

        match outcome {
            Ok(identity) => {
                log::debug!("http request {} to {}", AuthStage::Dispatched, req.path());
                req.extensions_mut().insert(identity);
                Box::pin(self.service.call(req))
            }
            // Convert AppError to actix_web::Error
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}
