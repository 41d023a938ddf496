//! Account and session route handlers.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;
use tower_sessions::Session;

use listmate_core::{Email, FieldKind, FieldSpec, Schema, UserId, WriteMode};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::extract::validated;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

static CREDENTIALS_SCHEMA: Schema = Schema::new(&[
    FieldSpec {
        name: "email",
        kind: FieldKind::Text { max_length: 254 },
    },
    FieldSpec {
        name: "password",
        kind: FieldKind::Secret { max_length: 128 },
    },
]);

/// Account as returned by the auth endpoints.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: Email,
    pub is_staff: bool,
}

impl From<&CurrentUser> for UserResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_staff: user.is_staff,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(&CurrentUser::from(user))
    }
}

fn credentials(body: &Bytes) -> Result<(String, String)> {
    let fields = validated(&CREDENTIALS_SCHEMA, body, WriteMode::Create)?;
    match (fields.text("email"), fields.text("password")) {
        (Some(email), Some(password)) => Ok((email.to_owned(), password.to_owned())),
        _ => Err(AppError::Internal(
            "credentials passed validation without both fields".to_string(),
        )),
    }
}

/// Create an account.
///
/// POST /auth/register
///
/// Accounts created here are never staff.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let (email, password) = credentials(&body)?;

    let user = AuthService::new(state.pool())
        .register(&email, &password, false)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Log in with email and password.
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Result<Json<UserResponse>> {
    let (email, password) = credentials(&body)?;

    let user = match AuthService::new(state.pool()).login(&email, &password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::info!(error = %e, "login failed");
            return Err(e.into());
        }
    };

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    tracing::info!(user_id = %current.id, "user logged in");
    Ok(Json(UserResponse::from(&current)))
}

/// End the session.
///
/// POST /auth/logout
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in account, re-read from the database.
///
/// GET /auth/me
///
/// A session whose account no longer exists is treated as logged out.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<UserResponse>> {
    match AuthService::new(state.pool()).get_user(current.id).await {
        Ok(user) => Ok(Json(UserResponse::from(&user))),
        Err(AuthError::UserNotFound) => Err(AppError::Unauthorized),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        let err = credentials(&Bytes::from_static(br#"{"email": "a@example.com"}"#))
            .err()
            .unwrap();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.get("password").is_some());
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_credentials_keep_password_verbatim() {
        let (email, password) = credentials(&Bytes::from_static(
            br#"{"email": " a@example.com ", "password": " secret pw "}"#,
        ))
        .unwrap();
        assert_eq!(email, "a@example.com");
        assert_eq!(password, " secret pw ");
    }

    #[test]
    fn test_user_response_shape() {
        let user = CurrentUser {
            id: UserId::new(7),
            email: Email::parse("shopper@example.com").unwrap(),
            is_staff: false,
        };
        let value = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "email": "shopper@example.com", "is_staff": false})
        );
    }
}
