use std::sync::Arc;

use validator::Validate;

use crate::auth::{
    AuthResponse, Identity, LoginRequest, PasswordHasher, SignUpRequest, TokenService,
};
use crate::error::AppError;
use crate::models::{NewUser, UpdateUserRequest, User, UserChanges};
use crate::store::UserStore;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Account lifecycle: sign-up, login and self-service CRUD.
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>, hasher: PasswordHasher) -> Self {
        Self {
            store,
            tokens,
            hasher,
        }
    }

    /// Creates an account and logs it in.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.store.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::already_exists("email already registered"));
        }

        let password_hash = self.hasher.hash(request.password).await?;
        let user = self
            .store
            .insert(NewUser {
                email: request.email,
                password_hash,
            })
            .await?;
        log::info!("user {} signed up", user.id);

        self.authenticated(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self
            .store
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::unauthenticated(INVALID_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify(request.password, user.password_hash.clone())
            .await?;
        if !matches {
            log::debug!("failed login for user {}", user.id);
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        }

        self.authenticated(user)
    }

    pub async fn profile(&self, identity: &Identity) -> Result<User, AppError> {
        self.store.find_by_id(user_id(identity)?).await
    }

    pub async fn update(
        &self,
        identity: &Identity,
        request: UpdateUserRequest,
    ) -> Result<User, AppError> {
        request.validate()?;
        let id = user_id(identity)?;

        let password_hash = match request.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };
        let changes = UserChanges {
            email: request.email,
            password_hash,
        };
        if changes.is_empty() {
            return self.store.find_by_id(id).await;
        }

        self.store.update(id, changes).await
    }

    pub async fn delete(&self, identity: &Identity) -> Result<(), AppError> {
        let id = user_id(identity)?;
        self.store.delete(id).await?;
        log::info!("user {} deleted", id);
        Ok(())
    }

    fn authenticated(&self, user: User) -> Result<AuthResponse, AppError> {
        let issued = self.tokens.issue(&user.identity())?;
        Ok(AuthResponse::new(issued, user))
    }
}

/// The user id a verified token names. Tokens minted here always carry a
/// numeric subject; anything else cannot refer to an account.
fn user_id(identity: &Identity) -> Result<i64, AppError> {
    identity
        .user_id
        .parse::<i64>()
        .map_err(|e| AppError::not_found("user not found").with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::{MemoryUserStore, MockUserStore};
    use chrono::Duration;

    fn service_with(store: Arc<dyn UserStore>) -> UserService {
        UserService::new(
            store,
            Arc::new(TokenService::new(b"user-service-secret", Duration::hours(1))),
            PasswordHasher::new(4),
        )
    }

    fn service() -> UserService {
        service_with(Arc::new(MemoryUserStore::new()))
    }

    fn sign_up(email: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_login() {
        let users = service();
        let created = users.sign_up(sign_up("a@example.com")).await.unwrap();
        assert_eq!(created.user.email, "a@example.com");

        let identity = users.tokens.verify(&created.token).unwrap();
        assert_eq!(identity.user_id, created.user.id.to_string());

        let logged_in = users
            .login(LoginRequest {
                email: "a@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, created.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_conflicts() {
        let users = service();
        users.sign_up(sign_up("a@example.com")).await.unwrap();
        let err = users.sign_up(sign_up("a@example.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_login_failures_look_the_same() {
        let users = service();
        users.sign_up(sign_up("a@example.com")).await.unwrap();

        let wrong_password = users
            .login(LoginRequest {
                email: "a@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        let unknown = users
            .login(LoginRequest {
                email: "b@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap_err();

        for err in [wrong_password, unknown] {
            assert_eq!(err.kind(), ErrorKind::Unauthenticated);
            assert_eq!(err.client_message(), INVALID_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn test_update_changes_password_and_email() {
        let users = service();
        let created = users.sign_up(sign_up("a@example.com")).await.unwrap();
        let identity = created.user.identity();

        let updated = users
            .update(
                &identity,
                UpdateUserRequest {
                    email: Some("new@example.com".to_string()),
                    password: Some("another-secret".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "new@example.com");

        assert!(users
            .login(LoginRequest {
                email: "new@example.com".to_string(),
                password: "another-secret".to_string(),
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_account() {
        let users = service();
        let created = users.sign_up(sign_up("a@example.com")).await.unwrap();
        let identity = created.user.identity();

        users.delete(&identity).await.unwrap();
        let err = users.profile(&identity).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_store_outage_is_internal() {
        let mut store = MockUserStore::new();
        store.expect_find_by_email().returning(|_| {
            Err(AppError::internal("database error")
                .with_source(std::io::Error::new(std::io::ErrorKind::Other, "connection reset")))
        });

        let err = service_with(Arc::new(store))
            .sign_up(sign_up("a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.client_message(), crate::error::INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_non_numeric_subject_has_no_account() {
        let users = service();
        let identity = Identity {
            user_id: "not-a-number".to_string(),
            email: "x@example.com".to_string(),
        };
        let err = users.profile(&identity).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
