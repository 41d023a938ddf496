//! Shopping list and membership repository.
//!
//! Membership is a join table; "lists I can see" is always answered with a
//! join on it so the database's own concurrency control applies.

use sqlx::PgPool;

use listmate_core::{ShoppingListId, UserId};

use super::users::UserRow;
use super::{RepositoryError, conflict_on_unique};
use crate::models::{ListChanges, ShoppingList, User};

/// Repository for shopping list database operations.
pub struct ShoppingListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShoppingListRepository<'a> {
    /// Create a new shopping list repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Lists the user is a member of, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_member(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ShoppingList>, RepositoryError> {
        let lists = sqlx::query_as::<_, ShoppingList>(
            r"
            SELECT l.id, l.name, l.created_at, l.updated_at
            FROM listmate.shopping_list l
            JOIN listmate.shopping_list_member m ON m.shopping_list_id = l.id
            WHERE m.user_id = $1
            ORDER BY l.created_at, l.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }

    /// Get a list by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShoppingListId) -> Result<Option<ShoppingList>, RepositoryError> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r"
            SELECT id, name, created_at, updated_at
            FROM listmate.shopping_list
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(list)
    }

    /// Create a list with no members.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str) -> Result<ShoppingList, RepositoryError> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r"
            INSERT INTO listmate.shopping_list (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at, updated_at
            ",
        )
        .bind(ShoppingListId::generate())
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(list)
    }

    /// Apply changes to a list. Fields left as `None` keep their value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the list no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ShoppingListId,
        changes: &ListChanges,
    ) -> Result<ShoppingList, RepositoryError> {
        sqlx::query_as::<_, ShoppingList>(
            r"
            UPDATE listmate.shopping_list
            SET name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a list. Items and memberships go with it.
    ///
    /// # Returns
    ///
    /// Returns `true` if the list was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ShoppingListId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM listmate.shopping_list WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Whether the user is a member of the list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_member(
        &self,
        list_id: ShoppingListId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM listmate.shopping_list_member
                WHERE shopping_list_id = $1 AND user_id = $2
            )
            ",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Members of a list, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn members(&self, list_id: ShoppingListId) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.is_staff, u.created_at, u.updated_at
            FROM listmate."user" u
            JOIN listmate.shopping_list_member m ON m.user_id = u.id
            WHERE m.shopping_list_id = $1
            ORDER BY m.added_at, u.id
            "#,
        )
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Add a user to a list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user is already a member.
    /// Returns `RepositoryError::NotFound` if the list or user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_member(
        &self,
        list_id: ShoppingListId,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO listmate.shopping_list_member (shopping_list_id, user_id)
            VALUES ($1, $2)
            ",
        )
        .bind(list_id)
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            conflict_on_unique(e, "user is already a member of this list")
        })?;

        Ok(())
    }

    /// Remove a user from a list.
    ///
    /// # Returns
    ///
    /// Returns `true` if a membership was removed, `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_member(
        &self,
        list_id: ShoppingListId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM listmate.shopping_list_member
            WHERE shopping_list_id = $1 AND user_id = $2
            ",
        )
        .bind(list_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
