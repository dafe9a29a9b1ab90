pub mod bearer;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use crate::models::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use bearer::{authenticate, extract_bearer, AuthStage, CredentialError};
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, Clock, IssuedToken, ManualClock, SystemClock, TokenError, TokenService};

/// The verified caller behind a request.
///
/// Produced only by a successful token verification and attached to the
/// request by the transport adapters. `user_id` is the token subject and is
/// the owner key for every task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. Must not be empty.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Email address for the new account.
    /// Must be a valid email format and not already registered.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response structure after successful authentication (login or sign-up).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests on either service.
    pub token: String,
    /// Instant the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl AuthResponse {
    pub fn new(issued: IssuedToken, user: User) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        }
    }
}
