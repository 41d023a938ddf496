//! Shopping list route handlers.
//!
//! Every handler authenticates first, then runs the list gate, and only then
//! looks at the request body.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;

use listmate_core::{ShoppingItemId, ShoppingListId, WriteMode};

use crate::db::{ShoppingItemRepository, ShoppingListRepository};
use crate::error::{AppError, Result};
use crate::extract::{Ids, validated};
use crate::middleware::RequireAuth;
use crate::models::{LIST_SCHEMA, ListChanges, ShoppingItem, ShoppingList};
use crate::services::authorize_list;
use crate::state::AppState;

// =============================================================================
// Response Types
// =============================================================================

/// List as it appears in the collection and after creation.
#[derive(Debug, Serialize)]
pub struct ListSummary {
    pub id: ShoppingListId,
    pub name: String,
}

/// List with its items.
#[derive(Debug, Serialize)]
pub struct ListDetail {
    pub id: ShoppingListId,
    pub name: String,
    pub shopping_items: Vec<ItemResponse>,
}

/// Item as returned by every item-bearing response.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ShoppingItemId,
    pub name: String,
    pub purchased: bool,
}

impl From<&ShoppingList> for ListSummary {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
        }
    }
}

impl From<&ShoppingItem> for ItemResponse {
    fn from(item: &ShoppingItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            purchased: item.purchased,
        }
    }
}

impl ListDetail {
    fn new(list: &ShoppingList, items: &[ShoppingItem]) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            shopping_items: items.iter().map(ItemResponse::from).collect(),
        }
    }
}

async fn detail(state: &AppState, list: &ShoppingList) -> Result<Json<ListDetail>> {
    let items = ShoppingItemRepository::new(state.pool())
        .list_for_list(list.id)
        .await?;
    Ok(Json(ListDetail::new(list, &items)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Lists the caller is a member of.
///
/// GET /shopping-lists
///
/// Staff are filtered like everyone else here; their bypass only applies to
/// the per-list endpoints.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ListSummary>>> {
    let lists = ShoppingListRepository::new(state.pool())
        .list_for_member(user.id)
        .await?;

    Ok(Json(lists.iter().map(ListSummary::from).collect()))
}

/// Create a list.
///
/// POST /shopping-lists
///
/// The new list has no members; the creator is not added.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Bytes,
) -> Result<(StatusCode, Json<ListSummary>)> {
    let fields = validated(&LIST_SCHEMA, &body, WriteMode::Create)?;
    let Some(name) = ListChanges::from(&fields).name else {
        return Err(AppError::Internal(
            "list body passed validation without a name".to_string(),
        ));
    };

    let list = ShoppingListRepository::new(state.pool())
        .create(&name)
        .await?;

    tracing::info!(list_id = %list.id, user_id = %user.id, "shopping list created");
    Ok((StatusCode::CREATED, Json(ListSummary::from(&list))))
}

/// A list with its items.
///
/// GET /shopping-lists/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids(id): Ids<ShoppingListId>,
) -> Result<Json<ListDetail>> {
    let list = authorize_list(state.pool(), &user, id).await?;
    detail(&state, &list).await
}

/// Replace a list's fields.
///
/// PUT /shopping-lists/{id}
pub async fn replace(
    state: State<AppState>,
    auth: RequireAuth,
    ids: Ids<ShoppingListId>,
    body: Bytes,
) -> Result<Json<ListDetail>> {
    write(state, auth, ids, body, WriteMode::Replace).await
}

/// Update some of a list's fields.
///
/// PATCH /shopping-lists/{id}
///
/// Unknown fields are ignored; a body with no known field leaves the list as is.
pub async fn partial_update(
    state: State<AppState>,
    auth: RequireAuth,
    ids: Ids<ShoppingListId>,
    body: Bytes,
) -> Result<Json<ListDetail>> {
    write(state, auth, ids, body, WriteMode::Partial).await
}

async fn write(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids(id): Ids<ShoppingListId>,
    body: Bytes,
    mode: WriteMode,
) -> Result<Json<ListDetail>> {
    let list = authorize_list(state.pool(), &user, id).await?;
    let fields = validated(&LIST_SCHEMA, &body, mode)?;

    let list = ShoppingListRepository::new(state.pool())
        .update(list.id, &ListChanges::from(&fields))
        .await?;

    tracing::debug!(list_id = %list.id, user_id = %user.id, "shopping list updated");
    detail(&state, &list).await
}

/// Delete a list and all of its items.
///
/// DELETE /shopping-lists/{id}
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Ids(id): Ids<ShoppingListId>,
) -> Result<StatusCode> {
    let list = authorize_list(state.pool(), &user, id).await?;

    if !ShoppingListRepository::new(state.pool())
        .delete(list.id)
        .await?
    {
        return Err(AppError::NotFound);
    }

    tracing::info!(list_id = %list.id, user_id = %user.id, "shopping list deleted");
    Ok(StatusCode::NO_CONTENT)
}
