use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use wayfinder_domain::email::EmailError;

use crate::domain::types::LocationInvalid;

/// Reasons a bulk CSV import is rejected. Any of these aborts the whole import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("unreadable csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("upload has no file name")]
    MissingFileName,
    #[error("line {line}: unknown location type {value:?}")]
    UnknownType { line: u64, value: String },
    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

impl ImportError {
    /// IO failures are ours, not the uploader's.
    fn is_io(&self) -> bool {
        matches!(self, Self::Csv(e) if e.is_io_error())
    }
}

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("token already confirmed")]
    TokenAlreadyConfirmed,
    #[error("user not found")]
    UserNotFound,
    #[error("location not found")]
    LocationNotFound,
    #[error("token not found")]
    TokenNotFound,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account disabled")]
    AccountDisabled,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TokenAlreadyConfirmed => "TOKEN_ALREADY_CONFIRMED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::LocationNotFound => "LOCATION_NOT_FOUND",
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Import(_) => "IMPORT_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UserAlreadyExists | Self::TokenAlreadyConfirmed => StatusCode::CONFLICT,
            Self::UserNotFound | Self::LocationNotFound | Self::TokenNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::TokenExpired => StatusCode::GONE,
            Self::InvalidCredentials | Self::AccountDisabled | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Import(e) if e.is_io() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<LocationInvalid> for ApiError {
    fn from(e: LocationInvalid) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<EmailError> for ApiError {
    fn from(e: EmailError) -> Self {
        match e {
            EmailError::Empty => Self::validation("email is required"),
            other => Self::Validation(format!("invalid email: {other}")),
        }
    }
}
