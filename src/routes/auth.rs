use crate::{
    auth::{LoginRequest, SignUpRequest},
    error::AppError,
    services::UserService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Sign up
///
/// Creates a new account and returns a token for it.
///
/// ## Responses:
/// - `201 Created`: `{token, expires_at, user}`.
/// - `400 Bad Request`: Malformed body, invalid email or a password under 6 characters.
/// - `409 Conflict`: The email is already registered.
#[post("/signup")]
pub async fn signup(
    users: web::Data<UserService>,
    signup_data: web::Json<SignUpRequest>,
) -> Result<impl Responder, AppError> {
    let response = users.sign_up(signup_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Authenticates a user and returns an authentication token. Unknown emails
/// and wrong passwords get the same 401.
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = users.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
