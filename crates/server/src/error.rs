//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Server-side failures are
//! captured to Sentry before a sanitized JSON body is sent to the client.
//!
//! # Response bodies
//!
//! - Validation errors: a field map, `{"name": ["This field is required."]}`.
//!   A rejected email or password on registration is reported the same way.
//! - Everything else: `{"detail": "..."}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use listmate_core::FieldErrors;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND: &str = "Not found.";
const INTERNAL: &str = "Internal server error";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request body failed schema validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Malformed request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No logged-in user.
    #[error("Unauthorized")]
    Unauthorized,

    /// Logged in, but not allowed to touch the resource.
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("Not found")]
    NotFound,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::BAD_REQUEST,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists
                | AuthError::WeakPassword(_)
                | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details are never exposed.
    fn detail(&self) -> String {
        match self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound => NOT_FOUND.to_string(),
            Self::Database(RepositoryError::Conflict(msg)) | Self::BadRequest(msg) => msg.clone(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    "Invalid email or password.".to_string()
                }
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists.".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Enter a valid email address.".to_string(),
                AuthError::Repository(_) | AuthError::PasswordHash => INTERNAL.to_string(),
            },
            Self::Unauthorized => NOT_AUTHENTICATED.to_string(),
            Self::Forbidden => PERMISSION_DENIED.to_string(),
            Self::Validation(errors) => errors.to_string(),
            Self::Database(_) | Self::Internal(_) => INTERNAL.to_string(),
        }
    }

    /// Field-level errors for variants that concern a single input field.
    fn field_errors(self) -> std::result::Result<FieldErrors, Self> {
        let mut errors = FieldErrors::default();
        match self {
            Self::Validation(errors) => return Ok(errors),
            Self::Auth(AuthError::InvalidEmail(_)) => {
                errors.add("email", "Enter a valid email address.");
            }
            Self::Auth(AuthError::WeakPassword(msg)) => errors.add("password", msg),
            other => return Err(other),
        }
        Ok(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self.field_errors() {
            Ok(errors) => (status, Json(errors)).into_response(),
            Err(other) => (status, Json(json!({ "detail": other.detail() }))).into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
