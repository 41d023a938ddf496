//! Authorization gate for list-scoped endpoints.

use sqlx::PgPool;

use listmate_core::{ShoppingListId, decide};

use crate::db::ShoppingListRepository;
use crate::error::AppError;
use crate::models::{CurrentUser, ShoppingList};

/// Load a list and check that `user` may act on it.
///
/// A missing list is `NotFound`; an existing list the user is not allowed to
/// touch is `Forbidden`. Staff skip the membership query.
///
/// # Errors
///
/// Returns `AppError::NotFound`, `AppError::Forbidden`, or `AppError::Database`.
pub async fn authorize_list(
    pool: &PgPool,
    user: &CurrentUser,
    list_id: ShoppingListId,
) -> Result<ShoppingList, AppError> {
    let lists = ShoppingListRepository::new(pool);
    let list = lists.get(list_id).await?.ok_or(AppError::NotFound)?;

    let caller = user.caller();
    let is_member = !caller.is_staff && lists.is_member(list_id, caller.id).await?;

    if decide(&caller, is_member).is_allowed() {
        Ok(list)
    } else {
        tracing::debug!(user_id = %caller.id, list_id = %list_id, "list access denied");
        Err(AppError::Forbidden)
    }
}
