//! Authentication extractors.
//!
//! `RequireAuth` runs before any handler logic, so an anonymous request is
//! answered with 401 before the access gate or body validation are reached.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalAuth(user) = OptionalAuth::from_request_parts(parts, state).await?;

        user.map(Self).ok_or(AppError::Unauthorized)
    }
}

/// Extractor that optionally gets the current user.
///
/// A session store that cannot be read is a server error, not an anonymous
/// request.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };

        let loaded = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await;
        session_user(loaded).map(Self)
    }
}

fn session_user(
    loaded: Result<Option<CurrentUser>, tower_sessions::session::Error>,
) -> Result<Option<CurrentUser>, AppError> {
    loaded.map_err(|e| AppError::Internal(format!("session load failed: {e}")))
}

/// Store the logged-in user in the session.
///
/// The session ID is cycled first so a pre-login session ID cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Drop the whole session (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot be updated.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use listmate_core::{Email, UserId};
    use tower_sessions::session_store;

    fn shopper() -> CurrentUser {
        CurrentUser {
            id: UserId::new(3),
            email: Email::parse("shopper@example.com").unwrap(),
            is_staff: false,
        }
    }

    #[test]
    fn test_session_user_passes_through_stored_user() {
        let user = session_user(Ok(Some(shopper()))).unwrap();
        assert_eq!(user.map(|u| u.id), Some(UserId::new(3)));
        assert!(session_user(Ok(None)).unwrap().is_none());
    }

    #[test]
    fn test_session_store_failure_is_server_error() {
        let failure = tower_sessions::session::Error::Store(session_store::Error::Backend(
            "connection refused".to_string(),
        ));
        let err = session_user(Err(failure)).err().unwrap();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_require_auth_without_session_is_unauthorized() {
        let (mut parts, ()) = Request::new(()).into_parts();
        let err = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
