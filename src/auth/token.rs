use crate::auth::Identity;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Validity window used when `JWT_EXPIRATION` is not configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Source of the current instant for issuing and checking tokens.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used to exercise expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Represents the claims encoded within an identity token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the owner's unique identifier.
    pub sub: String,
    /// Contact address carried for convenience.
    pub email: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expires-at, seconds since epoch. Exclusive.
    pub exp: i64,
}

/// Why a token was refused. The distinction is for diagnostics: every
/// verification failure is `Unauthenticated` once it reaches a client.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed(#[source] jsonwebtoken::errors::Error),
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Expired => AppError::unauthenticated("token has expired").with_source(error),
            TokenError::Malformed(_) | TokenError::InvalidSignature => {
                AppError::unauthenticated("invalid token").with_source(error)
            }
            TokenError::Signing(_) | TokenError::ExpiryOutOfRange => {
                AppError::internal("failed to issue token").with_source(error)
            }
        }
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 identity tokens.
///
/// Holds only immutable key material, the validity window and a clock, so one
/// instance is shared by every request behind an `Arc`. Expiry is checked
/// against the injected clock rather than by `jsonwebtoken`, so issuing and
/// verifying always agree on what "now" is.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self::with_clock(secret, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    /// Signs a token for `identity`, valid from now for the configured window.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or(expires_at);

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies signature, shape and expiry, returning the identity it proves.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed(JwtErrorKind::InvalidSubject.into()));
        }
        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(Identity {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(error),
    }
}
