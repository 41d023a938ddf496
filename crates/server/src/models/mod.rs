//! Domain models for the server.
//!
//! These types represent validated domain objects separate from database row
//! types and from the JSON shapes returned by the API.

pub mod session;
pub mod shopping;
pub mod user;

pub use session::{CurrentUser, keys as session_keys};
pub use shopping::{
    ITEM_SCHEMA, ItemChanges, LIST_SCHEMA, ListChanges, NewItem, ShoppingItem, ShoppingList,
};
pub use user::User;
