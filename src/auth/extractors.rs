use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::Identity;
use crate::error::AppError;

/// Extracts the authenticated caller from request extensions.
///
/// Only meaningful on routes behind `AuthMiddleware`, which inserts the
/// identity after verifying the token. A missing identity is answered with
/// 401 rather than reaching the handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>().cloned() {
            Some(identity) => ready(Ok(AuthenticatedUser(identity))),
            None => {
                let err = AppError::unauthenticated("missing authenticated identity");
                ready(Err(err.into()))
            }
        }
    }
}
