//! HTTP route handlers.
//!
//! # Route Structure
//!
//! Trailing slashes are optional on every route.
//!
//! ```text
//! # Auth
//! POST   /auth/register                           - Create an account
//! POST   /auth/login                              - Start a session
//! POST   /auth/logout                             - End the session
//! GET    /auth/me                                 - Current account
//!
//! # Lists (require auth)
//! GET    /shopping-lists                          - Lists the caller belongs to
//! POST   /shopping-lists                          - Create a list
//! GET    /shopping-lists/{id}                     - List with items
//! PUT    /shopping-lists/{id}                     - Replace
//! PATCH  /shopping-lists/{id}                     - Partial update
//! DELETE /shopping-lists/{id}                     - Delete (items cascade)
//!
//! # Items (require auth + list access)
//! POST   /shopping-lists/{id}/items               - Add an item
//! GET    /shopping-lists/{id}/items/{item_id}     - Item
//! PUT    /shopping-lists/{id}/items/{item_id}     - Replace
//! PATCH  /shopping-lists/{id}/items/{item_id}     - Partial update
//! DELETE /shopping-lists/{id}/items/{item_id}     - Delete
//!
//! # Members (require auth + list access)
//! GET    /shopping-lists/{id}/members             - Members
//! POST   /shopping-lists/{id}/members             - Add by email
//! DELETE /shopping-lists/{id}/members/{user_id}   - Remove
//! ```

pub mod auth;
pub mod members;
pub mod shopping_items;
pub mod shopping_lists;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the shopping list, item, and member routes router.
pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping-lists",
            get(shopping_lists::list).post(shopping_lists::create),
        )
        .route(
            "/shopping-lists/{id}",
            get(shopping_lists::retrieve)
                .put(shopping_lists::replace)
                .patch(shopping_lists::partial_update)
                .delete(shopping_lists::destroy),
        )
        .route("/shopping-lists/{id}/items", post(shopping_items::create))
        .route(
            "/shopping-lists/{id}/items/{item_id}",
            get(shopping_items::retrieve)
                .put(shopping_items::replace)
                .patch(shopping_items::partial_update)
                .delete(shopping_items::destroy),
        )
        .route(
            "/shopping-lists/{id}/members",
            get(members::list).post(members::add),
        )
        .route("/shopping-lists/{id}/members/{user_id}", delete(members::remove))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .merge(shopping_list_routes())
}
