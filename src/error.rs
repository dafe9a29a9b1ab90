//!
//! # Error Taxonomy
//!
//! This module defines `AppError`, the single error type that crosses component
//! boundaries in both services, and `ErrorKind`, the closed classification that
//! alone decides which status a client sees.
//!
//! The kind-to-status mapping lives in one table, `STATUS_TABLE`. The HTTP
//! conversion (`actix_web::ResponseError`), the gRPC conversion (`tonic::Status`)
//! and both reverse mappings read from it, so the two transports cannot drift.
//!
//! Lower-level failures (`sqlx`, `bcrypt`, `validator`, blocking-pool joins) enter
//! the taxonomy through the `From` impls below. The original error is kept as the
//! `source` for logs; for `Internal` and `Unknown` kinds the client only ever sees
//! a generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::error::Error as StdError;
use std::fmt;
use tonic::{Code, Status};
use validator::ValidationErrors;

/// Message sent to clients in place of any internal error detail.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Closed set of protocol-agnostic failure causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorKind {
    /// The request is malformed or fails validation.
    InvalidInput,
    /// The addressed resource does not exist (or is not visible to the caller).
    NotFound,
    /// A resource with the same unique key already exists.
    AlreadyExists,
    /// No valid credential accompanies the request.
    Unauthenticated,
    /// The caller is authenticated but may not perform the operation.
    PermissionDenied,
    /// An unexpected server-side failure.
    Internal,
    /// A failure of unrecognized origin. Always rendered as an internal error.
    #[default]
    Unknown,
}

/// Kind to wire status, one row per kind. `Unknown` has no row on purpose:
/// it falls through to the internal status on every transport.
const STATUS_TABLE: [(ErrorKind, StatusCode, Code); 6] = [
    (ErrorKind::InvalidInput, StatusCode::BAD_REQUEST, Code::InvalidArgument),
    (ErrorKind::NotFound, StatusCode::NOT_FOUND, Code::NotFound),
    (ErrorKind::AlreadyExists, StatusCode::CONFLICT, Code::AlreadyExists),
    (ErrorKind::Unauthenticated, StatusCode::UNAUTHORIZED, Code::Unauthenticated),
    (ErrorKind::PermissionDenied, StatusCode::FORBIDDEN, Code::PermissionDenied),
    (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, Code::Internal),
];

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::InvalidInput,
        ErrorKind::NotFound,
        ErrorKind::AlreadyExists,
        ErrorKind::Unauthenticated,
        ErrorKind::PermissionDenied,
        ErrorKind::Internal,
        ErrorKind::Unknown,
    ];

    /// HTTP status for this kind.
    pub fn http_status(self) -> StatusCode {
        STATUS_TABLE
            .iter()
            .find(|(kind, _, _)| *kind == self)
            .map(|(_, status, _)| *status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// gRPC status code for this kind.
    pub fn grpc_code(self) -> Code {
        STATUS_TABLE
            .iter()
            .find(|(kind, _, _)| *kind == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(Code::Internal)
    }

    /// Reverse of [`ErrorKind::http_status`]. Statuses outside the table map to `Unknown`.
    pub fn from_http_status(status: StatusCode) -> Self {
        STATUS_TABLE
            .iter()
            .find(|(_, candidate, _)| *candidate == status)
            .map(|(kind, _, _)| *kind)
            .unwrap_or(ErrorKind::Unknown)
    }

    /// Reverse of [`ErrorKind::grpc_code`]. Codes outside the table map to `Unknown`.
    pub fn from_grpc_code(code: Code) -> Self {
        STATUS_TABLE
            .iter()
            .find(|(_, _, candidate)| *candidate == code)
            .map(|(kind, _, _)| *kind)
            .unwrap_or(ErrorKind::Unknown)
    }

    /// Whether errors of this kind must have their message redacted.
    pub fn is_internal(self) -> bool {
        matches!(self, ErrorKind::Internal | ErrorKind::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Internal => "internal",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error value returned across every component boundary.
///
/// Carries exactly one [`ErrorKind`], a message and an optional cause. The cause
/// is for diagnostics only and is never serialized to a client.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attaches the lower-level cause. Kept for logs, never sent to clients.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        self.source = Some(source.into());
        self
    }

    /// Re-classifies this error as `Internal`, keeping it as the cause.
    pub fn into_internal(self, message: impl Into<String>) -> Self {
        if self.kind == ErrorKind::Internal {
            return self;
        }
        AppError::internal(message).with_source(self)
    }


    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message a client is allowed to see.
    pub fn client_message(&self) -> &str {
        if self.kind.is_internal() {
            INTERNAL_MESSAGE
        } else {
            &self.message
        }
    }

    /// Full diagnostic chain: the message followed by every cause.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            report.push_str(": ");
            report.push_str(&err.to_string());
            cause = err.source();
        }
        report
    }

    fn log_at_boundary(&self) {
        if self.kind.is_internal() {
            log::error!("{}", self.report());
        } else {
            log::debug!("{}", self.report());
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

/// Renders `AppError` as a JSON body with the status from the kind table.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        self.log_at_boundary();
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.client_message()
        }))
    }
}

impl From<AppError> for Status {
    fn from(error: AppError) -> Status {
        error.log_at_boundary();
        Status::new(error.kind.grpc_code(), error.client_message())
    }
}

/// `RowNotFound` becomes `NotFound`, unique-key violations become
/// `AlreadyExists`, everything else is `Internal`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::not_found("record not found"),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::already_exists("record already exists").with_source(error)
            }
            _ => AppError::internal("database error").with_source(error),
        }
    }
}

/// The detailed validation messages are preserved; they are client-safe.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::invalid_input(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::internal("password hashing failed").with_source(error)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> AppError {
        AppError::internal("background task failed").with_source(error)
    }
}
