use std::sync::Arc;

use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::auth::bearer::AUTHORIZATION;
use crate::auth::{authenticate, AuthStage, Identity, TokenService};
use crate::error::AppError;

/// Gate in front of every task RPC.
///
/// Verifies the `authorization` metadata and stores the resulting
/// [`Identity`] in the request extensions. Rejected calls never reach the
/// service implementation.
#[derive(Clone)]
pub struct AuthInterceptor {
    tokens: Arc<TokenService>,
}

impl AuthInterceptor {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let identity = authenticate(
            &self.tokens,
            "grpc",
            request
                .metadata()
                .get(AUTHORIZATION)
                .map(|value| value.as_bytes()),
        )?;

        log::debug!(
            "grpc request {} for user {}",
            AuthStage::Dispatched,
            identity.user_id
        );
        request.extensions_mut().insert(identity);
        Ok(request)
    }
}

/// Typed access to the identity the interceptor attached.
pub trait RequestIdentity {
    fn identity(&self) -> Result<&Identity, Status>;
}

impl<T> RequestIdentity for Request<T> {
    fn identity(&self) -> Result<&Identity, Status> {
        self.extensions()
            .get::<Identity>()
            .ok_or_else(|| AppError::unauthenticated("missing authenticated identity").into())
    }
}
