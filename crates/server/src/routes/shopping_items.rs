//! Shopping item route handlers.
//!
//! Items are nested under their list. The list in the path is gated first;
//! an item ID that belongs to a different list is simply not found.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};

use listmate_core::{ShoppingItemId, ShoppingListId, WriteMode};

use super::shopping_lists::ItemResponse;
use crate::db::ShoppingItemRepository;
use crate::error::{AppError, Result};
use crate::extract::{Ids, validated};
use crate::middleware::RequireAuth;
use crate::models::{ITEM_SCHEMA, ItemChanges};
use crate::services::authorize_list;
use crate::state::AppState;

/// Add an item to a list.
///
/// POST /shopping-lists/{id}/items
///
/// Both `name` and `purchased` are required. The owning list is taken from
/// the path; a list ID in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids(list_id): Ids<ShoppingListId>,
    body: Bytes,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let list = authorize_list(state.pool(), &user, list_id).await?;
    let fields = validated(&ITEM_SCHEMA, &body, WriteMode::Create)?;

    let Some(new_item) = ItemChanges::from(&fields).into_new_item() else {
        return Err(AppError::Internal(
            "item body passed validation with missing fields".to_string(),
        ));
    };

    let item = ShoppingItemRepository::new(state.pool())
        .create(list.id, &new_item)
        .await?;

    tracing::info!(
        list_id = %list.id,
        item_id = %item.id,
        user_id = %user.id,
        "shopping item created"
    );
    Ok((StatusCode::CREATED, Json(ItemResponse::from(&item))))
}

/// A single item.
///
/// GET /shopping-lists/{id}/items/{item_id}
pub async fn retrieve(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids((list_id, item_id)): Ids<(ShoppingListId, ShoppingItemId)>,
) -> Result<Json<ItemResponse>> {
    let list = authorize_list(state.pool(), &user, list_id).await?;

    let item = ShoppingItemRepository::new(state.pool())
        .get(list.id, item_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ItemResponse::from(&item)))
}

/// Replace an item's fields. Both fields are required.
///
/// PUT /shopping-lists/{id}/items/{item_id}
pub async fn replace(
    state: State<AppState>,
    auth: RequireAuth,
    ids: Ids<(ShoppingListId, ShoppingItemId)>,
    body: Bytes,
) -> Result<Json<ItemResponse>> {
    write(state, auth, ids, body, WriteMode::Replace).await
}

/// Update some of an item's fields.
///
/// PATCH /shopping-lists/{id}/items/{item_id}
pub async fn partial_update(
    state: State<AppState>,
    auth: RequireAuth,
    ids: Ids<(ShoppingListId, ShoppingItemId)>,
    body: Bytes,
) -> Result<Json<ItemResponse>> {
    write(state, auth, ids, body, WriteMode::Partial).await
}

async fn write(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids((list_id, item_id)): Ids<(ShoppingListId, ShoppingItemId)>,
    body: Bytes,
    mode: WriteMode,
) -> Result<Json<ItemResponse>> {
    let list = authorize_list(state.pool(), &user, list_id).await?;
    let fields = validated(&ITEM_SCHEMA, &body, mode)?;

    let item = ShoppingItemRepository::new(state.pool())
        .update(list.id, item_id, &ItemChanges::from(&fields))
        .await?;

    tracing::debug!(list_id = %list.id, item_id = %item.id, "shopping item updated");
    Ok(Json(ItemResponse::from(&item)))
}

/// Remove an item from its list.
///
/// DELETE /shopping-lists/{id}/items/{item_id}
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids((list_id, item_id)): Ids<(ShoppingListId, ShoppingItemId)>,
) -> Result<StatusCode> {
    let list = authorize_list(state.pool(), &user, list_id).await?;

    if !ShoppingItemRepository::new(state.pool())
        .delete(list.id, item_id)
        .await?
    {
        return Err(AppError::NotFound);
    }

    tracing::info!(
        list_id = %list.id,
        item_id = %item_id,
        user_id = %user.id,
        "shopping item deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
