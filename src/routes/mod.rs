pub mod auth;
pub mod health;
pub mod users;

use std::sync::Arc;

use actix_web::web;

use crate::auth::{AuthMiddleware, TokenService};
use crate::error::AppError;

/// Public routes: health and the `/auth` scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health).service(
        web::scope("/auth")
            .service(auth::signup)
            .service(auth::login),
    );
}

/// Routes that require an authenticated caller. Mounted under `/api`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::me)
            .service(users::update_me)
            .service(users::delete_me),
    );
}

/// Every user-service route, with `/api` behind the auth middleware.
pub fn configure(tokens: Arc<TokenService>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.configure(config).service(
            web::scope("/api")
                .wrap(AuthMiddleware::new(tokens))
                .configure(api_config),
        );
    }
}

/// Malformed or mistyped JSON bodies are invalid input, not actix's default
/// plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::invalid_input(err.to_string()).into())
}
