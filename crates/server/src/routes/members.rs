//! List membership route handlers.
//!
//! Gated exactly like the list itself: any member (or staff) may see and
//! change who else is on a list.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;

use listmate_core::{
    Email, FieldErrors, FieldKind, FieldSpec, Schema, ShoppingListId, UserId, WriteMode,
};

use crate::db::{RepositoryError, ShoppingListRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::extract::{Ids, validated};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::authorize_list;
use crate::state::AppState;

static MEMBER_SCHEMA: Schema = Schema::new(&[FieldSpec {
    name: "email",
    kind: FieldKind::Text { max_length: 254 },
}]);

/// A list member.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: UserId,
    pub email: Email,
}

impl From<&User> for MemberResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

fn email_error(message: &str) -> AppError {
    let mut errors = FieldErrors::default();
    errors.add("email", message);
    AppError::Validation(errors)
}

/// Members of a list.
///
/// GET /shopping-lists/{id}/members
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids(list_id): Ids<ShoppingListId>,
) -> Result<Json<Vec<MemberResponse>>> {
    let list = authorize_list(state.pool(), &user, list_id).await?;

    let members = ShoppingListRepository::new(state.pool())
        .members(list.id)
        .await?;

    Ok(Json(members.iter().map(MemberResponse::from).collect()))
}

/// Add an existing account to a list by email.
///
/// POST /shopping-lists/{id}/members
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids(list_id): Ids<ShoppingListId>,
    body: Bytes,
) -> Result<(StatusCode, Json<MemberResponse>)> {
    let list = authorize_list(state.pool(), &user, list_id).await?;
    let fields = validated(&MEMBER_SCHEMA, &body, WriteMode::Create)?;

    let email = fields
        .text("email")
        .map(Email::parse)
        .and_then(std::result::Result::ok)
        .ok_or_else(|| email_error("Enter a valid email address."))?;

    let member = UserRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or_else(|| email_error("No account with this email address."))?;

    ShoppingListRepository::new(state.pool())
        .add_member(list.id, member.id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::BadRequest("This user is already a member of the list.".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(
        list_id = %list.id,
        member_id = %member.id,
        user_id = %user.id,
        "member added"
    );
    Ok((StatusCode::CREATED, Json(MemberResponse::from(&member))))
}

/// Remove a member from a list.
///
/// DELETE /shopping-lists/{id}/members/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids((list_id, member_id)): Ids<(ShoppingListId, UserId)>,
) -> Result<StatusCode> {
    let list = authorize_list(state.pool(), &user, list_id).await?;

    if !ShoppingListRepository::new(state.pool())
        .remove_member(list.id, member_id)
        .await?
    {
        return Err(AppError::NotFound);
    }

    tracing::info!(
        list_id = %list.id,
        member_id = %member_id,
        user_id = %user.id,
        "member removed"
    );
    Ok(StatusCode::NO_CONTENT)
}
