use crate::{
    auth::AuthenticatedUser, error::AppError, models::UpdateUserRequest, services::UserService,
};
use actix_web::{delete, get, put, web, HttpResponse, Responder};

/// Returns the caller's own account.
#[get("/me")]
pub async fn me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let account = users.profile(&user.0).await?;
    Ok(HttpResponse::Ok().json(account))
}

/// Changes the caller's email and/or password.
///
/// ## Responses:
/// - `200 OK`: The updated account.
/// - `400 Bad Request`: Invalid email or a password under 6 characters.
/// - `409 Conflict`: The new email belongs to another account.
#[put("/me")]
pub async fn update_me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
    update_data: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, AppError> {
    let account = users.update(&user.0, update_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(account))
}

/// Deletes the caller's account. Tokens already issued stay valid until they
/// expire but no longer resolve to an account.
#[delete("/me")]
pub async fn delete_me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    users.delete(&user.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
