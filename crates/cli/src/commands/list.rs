//! List membership commands.
//!
//! New lists start with no members, so staff use these to grant access.
//!
//! ```bash
//! listmate list add-member --list 5b0c...-... --email shopper@example.com
//! listmate list remove-member --list 5b0c...-... --email shopper@example.com
//! ```

use sqlx::PgPool;

use listmate_core::{Email, ShoppingListId};
use listmate_server::db::{RepositoryError, ShoppingListRepository, UserRepository};
use listmate_server::models::{ShoppingList, User};

use super::{CommandError, connect};

async fn resolve(
    pool: &PgPool,
    list: &str,
    email: &str,
) -> Result<(ShoppingList, User), CommandError> {
    let list_id: ShoppingListId = list
        .parse()
        .map_err(|_| CommandError::InvalidListId(list.to_owned()))?;
    let email = Email::parse(email)?;

    let list = ShoppingListRepository::new(pool)
        .get(list_id)
        .await?
        .ok_or_else(|| CommandError::ListNotFound(list_id.to_string()))?;
    let user = UserRepository::new(pool)
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;

    Ok((list, user))
}

/// Add a user to a list. Adding an existing member is a no-op.
pub async fn add_member(list: &str, email: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let (list, user) = resolve(&pool, list, email).await?;

    match ShoppingListRepository::new(&pool)
        .add_member(list.id, user.id)
        .await
    {
        Ok(()) => tracing::info!("Added {} to '{}' ({})", user.email, list.name, list.id),
        Err(RepositoryError::Conflict(_)) => {
            tracing::warn!("{} is already a member of '{}'", user.email, list.name);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Remove a user from a list.
pub async fn remove_member(list: &str, email: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let (list, user) = resolve(&pool, list, email).await?;

    if ShoppingListRepository::new(&pool)
        .remove_member(list.id, user.id)
        .await?
    {
        tracing::info!("Removed {} from '{}' ({})", user.email, list.name, list.id);
    } else {
        tracing::warn!("{} was not a member of '{}'", user.email, list.name);
    }
    Ok(())
}
