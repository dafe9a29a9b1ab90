//! Credential extraction and the enforcement sequence shared by the HTTP
//! middleware and the gRPC interceptor.
//!
//! Every protected request walks the same stages:
//!
//! ```text
//! Received -> CredentialExtracted -> Verified -> Dispatched
//!     \               \
//!      +---------------+--> Rejected (Unauthenticated)
//! ```
//!
//! A rejected request never reaches its handler.

use crate::auth::{Identity, TokenService};
use crate::error::AppError;
use std::fmt;

/// Header (HTTP) or metadata key (gRPC) carrying the credential.
pub const AUTHORIZATION: &str = "authorization";

/// The only accepted scheme. Matched case-insensitively.
pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Received,
    CredentialExtracted,
    Verified,
    Dispatched,
    Rejected,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthStage::Received => "received",
            AuthStage::CredentialExtracted => "credential_extracted",
            AuthStage::Verified => "verified",
            AuthStage::Dispatched => "dispatched",
            AuthStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("missing authorization token")]
    Missing,
    #[error("invalid authorization header")]
    Malformed,
}

impl From<CredentialError> for AppError {
    fn from(error: CredentialError) -> AppError {
        AppError::unauthenticated(error.to_string())
    }
}

/// Pulls the token out of a raw `authorization` value of the form
/// `Bearer <token>`.
pub fn extract_bearer(value: Option<&[u8]>) -> Result<&str, CredentialError> {
    let raw = value.ok_or(CredentialError::Missing)?;
    let value = std::str::from_utf8(raw)
        .ok()
        .filter(|v| v.is_ascii())
        .ok_or(CredentialError::Malformed)?
        .trim();

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(CredentialError::Malformed)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(CredentialError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(CredentialError::Malformed);
    }
    Ok(token)
}

/// Runs extraction and verification for one request.
///
/// `transport` only labels the log line. On success the caller attaches the
/// identity and dispatches; on failure it answers with the returned error.
pub fn authenticate(
    tokens: &TokenService,
    transport: &str,
    header: Option<&[u8]>,
) -> Result<Identity, AppError> {
    let token = match extract_bearer(header) {
        Ok(token) => token,
        Err(err) => return Err(reject(transport, AuthStage::Received, err.into())),
    };

    match tokens.verify(token) {
        Ok(identity) => {
            log::debug!(
                "{} request {} for user {}",
                transport,
                AuthStage::Verified,
                identity.user_id
            );
            Ok(identity)
        }
        Err(err) => Err(reject(transport, AuthStage::CredentialExtracted, err.into())),
    }
}

fn reject(transport: &str, stage: AuthStage, error: AppError) -> AppError {
    log::warn!(
        "{} request {} at stage {}: {}",
        transport,
        AuthStage::Rejected,
        stage,
        error.report()
    );
    error
}
