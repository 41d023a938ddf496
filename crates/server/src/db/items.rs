//! Shopping item repository.
//!
//! Items are always addressed through their owning list: every lookup and
//! write filters on `(shopping_list_id, id)` so an item is never reachable
//! under another list's ID.

use sqlx::PgPool;

use listmate_core::{ShoppingItemId, ShoppingListId};

use super::RepositoryError;
use crate::models::{ItemChanges, NewItem, ShoppingItem};

/// Repository for shopping item database operations.
pub struct ShoppingItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShoppingItemRepository<'a> {
    /// Create a new shopping item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Items on a list, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_list(
        &self,
        list_id: ShoppingListId,
    ) -> Result<Vec<ShoppingItem>, RepositoryError> {
        let items = sqlx::query_as::<_, ShoppingItem>(
            r"
            SELECT id, shopping_list_id, name, purchased, created_at, updated_at
            FROM listmate.shopping_item
            WHERE shopping_list_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Number of items on a list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_list(&self, list_id: ShoppingListId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM listmate.shopping_item WHERE shopping_list_id = $1",
        )
        .bind(list_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Get an item that belongs to the given list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<Option<ShoppingItem>, RepositoryError> {
        let item = sqlx::query_as::<_, ShoppingItem>(
            r"
            SELECT id, shopping_list_id, name, purchased, created_at, updated_at
            FROM listmate.shopping_item
            WHERE shopping_list_id = $1 AND id = $2
            ",
        )
        .bind(list_id)
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Add an item to a list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list was deleted concurrently.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        list_id: ShoppingListId,
        item: &NewItem,
    ) -> Result<ShoppingItem, RepositoryError> {
        sqlx::query_as::<_, ShoppingItem>(
            r"
            INSERT INTO listmate.shopping_item (id, shopping_list_id, name, purchased)
            VALUES ($1, $2, $3, $4)
            RETURNING id, shopping_list_id, name, purchased, created_at, updated_at
            ",
        )
        .bind(ShoppingItemId::generate())
        .bind(list_id)
        .bind(&item.name)
        .bind(item.purchased)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })
    }

    /// Apply changes to an item. Fields left as `None` keep their value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not on the list.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
        changes: &ItemChanges,
    ) -> Result<ShoppingItem, RepositoryError> {
        sqlx::query_as::<_, ShoppingItem>(
            r"
            UPDATE listmate.shopping_item
            SET name = COALESCE($3, name),
                purchased = COALESCE($4, purchased),
                updated_at = NOW()
            WHERE shopping_list_id = $1 AND id = $2
            RETURNING id, shopping_list_id, name, purchased, created_at, updated_at
            ",
        )
        .bind(list_id)
        .bind(item_id)
        .bind(changes.name.as_deref())
        .bind(changes.purchased)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete an item from a list.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if it was not on the list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM listmate.shopping_item
            WHERE shopping_list_id = $1 AND id = $2
            ",
        )
        .bind(list_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
