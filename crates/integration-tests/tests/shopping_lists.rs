//! Integration tests for shopping list endpoints.
//!
//! These tests require a `PostgreSQL` database reachable through `DATABASE_URL`.
//!
//! Run with: cargo test -p listmate-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use listmate_core::ShoppingListId;
use listmate_integration_tests::TestContext;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_valid_shopping_list_is_created() {
    let ctx = TestContext::new().await;
    let (_, client) = ctx.logged_in(false).await;

    let resp = client
        .post(ctx.url("/shopping-lists/"))
        .json(&json!({"name": "Groceries"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Groceries");

    let id: ShoppingListId = body["id"].as_str().unwrap().parse().unwrap();
    let stored = ctx.fetch_list(id).await.unwrap();
    assert_eq!(stored.name, "Groceries");
    assert_eq!(ctx.item_count(id).await, 0);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_name_missing_returns_bad_request() {
    let ctx = TestContext::new().await;
    let (_, client) = ctx.logged_in(false).await;

    let resp = client
        .post(ctx.url("/shopping-lists/"))
        .json(&json!({"something_else": "Groceries"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], json!(["This field is required."]));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_creator_is_not_added_as_member() {
    let ctx = TestContext::new().await;
    let (_, client) = ctx.logged_in(false).await;

    let resp = client
        .post(ctx.url("/shopping-lists"))
        .json(&json!({"name": "Orphan"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    let id = body["id"].as_str().unwrap();

    let resp = client
        .get(ctx.url(&format!("/shopping-lists/{id}/")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_malformed_json_returns_bad_request() {
    let ctx = TestContext::new().await;
    let (_, client) = ctx.logged_in(false).await;

    let resp = client
        .post(ctx.url("/shopping-lists/"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].is_string());
}

// ============================================================================
// List & Retrieve
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_client_retrieves_only_shopping_lists_they_are_member_of() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let other = ctx.create_user(false).await;

    let mine = ctx.create_list_with_members("Books", &[&user]).await;
    let theirs = ctx.create_list_with_members("Pets", &[&other]).await;

    let resp = client
        .get(ctx.url("/shopping-lists/"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], mine.id.to_string());
    assert_eq!(body[0]["name"], "Books");
    assert!(body.iter().all(|l| l["id"] != theirs.id.to_string()));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_staff_collection_is_filtered_by_membership() {
    let ctx = TestContext::new().await;
    let (_, client) = ctx.logged_in(true).await;
    let other = ctx.create_user(false).await;
    ctx.create_list_with_members("Not mine", &[&other]).await;

    let resp = client
        .get(ctx.url("/shopping-lists"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Vec<Value> = resp.json().await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_is_retrieved_by_id() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;

    let resp = client
        .get(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Groceries");
    assert_eq!(body["shopping_items"], json!([]));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_includes_only_corresponding_items() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;
    let other_list = ctx.create_list_with_members("Books", &[&user]).await;

    let eggs = ctx.create_item(list.id, "Eggs", false).await;
    ctx.create_item(other_list.id, "The seven sisters", false).await;

    let resp = client
        .get(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["shopping_items"],
        json!([{"id": eggs.id.to_string(), "name": "Eggs", "purchased": false}])
    );
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_unknown_and_malformed_list_ids_are_not_found() {
    let ctx = TestContext::new().await;
    let (_, client) = ctx.logged_in(false).await;

    for id in [ShoppingListId::generate().to_string(), "not-a-uuid".to_string()] {
        let resp = client
            .get(ctx.url(&format!("/shopping-lists/{id}/")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "id {id}");
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_admin_can_retrieve_shopping_list() {
    let ctx = TestContext::new().await;
    let (_, staff) = ctx.logged_in(true).await;
    let list = ctx.create_list("Staff can see this").await;

    let resp = staff
        .get(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_name_is_changed() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;

    let resp = client
        .put(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .json(&json!({"name": "Food"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Food");
    assert_eq!(ctx.fetch_list(list.id).await.unwrap().name, "Food");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_not_changed_because_wrong_field_names() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;

    let resp = client
        .put(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .json(&json!({"something_else": "Food"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.fetch_list(list.id).await.unwrap().name, "Groceries");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_name_is_changed_with_partial_update() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;

    let resp = client
        .patch(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .json(&json!({"name": "Food"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.fetch_list(list.id).await.unwrap().name, "Food");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_partial_update_with_missing_name_has_no_impact() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;

    let resp = client
        .patch(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .json(&json!({"something_else": "Food"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.fetch_list(list.id).await.unwrap().name, "Groceries");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_shopping_list_is_deleted_with_its_items() {
    let ctx = TestContext::new().await;
    let (user, client) = ctx.logged_in(false).await;
    let list = ctx.create_list_with_members("Groceries", &[&user]).await;
    let milk = ctx.create_item(list.id, "Milk", false).await;
    ctx.create_item(list.id, "Bread", true).await;

    let resp = client
        .delete(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.bytes().await.unwrap().is_empty());
    assert!(ctx.fetch_list(list.id).await.is_none());
    assert_eq!(ctx.item_count(list.id).await, 0);
    assert!(ctx.fetch_item(&milk).await.is_none());
}

// ============================================================================
// Access Control
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_non_member_is_forbidden_for_every_list_operation() {
    let ctx = TestContext::new().await;
    let (_, outsider) = ctx.logged_in(false).await;
    let owner = ctx.create_user(false).await;
    let list = ctx.create_list_with_members("Private", &[&owner]).await;
    let url = ctx.url(&format!("/shopping-lists/{}/", list.id));

    let responses = [
        outsider.get(&url).send().await.unwrap(),
        outsider
            .put(&url)
            .json(&json!({"name": "Hijacked"}))
            .send()
            .await
            .unwrap(),
        outsider
            .patch(&url)
            .json(&json!({"name": "Hijacked"}))
            .send()
            .await
            .unwrap(),
        outsider.delete(&url).send().await.unwrap(),
    ];

    for resp in responses {
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
    assert_eq!(ctx.fetch_list(list.id).await.unwrap().name, "Private");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_forbidden_takes_precedence_over_validation() {
    let ctx = TestContext::new().await;
    let (_, outsider) = ctx.logged_in(false).await;
    let list = ctx.create_list("Private").await;

    let resp = outsider
        .put(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (set DATABASE_URL)"]
async fn test_anonymous_requests_are_unauthorized() {
    let ctx = TestContext::new().await;
    let client = TestContext::anonymous_client();
    let list = ctx.create_list("Groceries").await;

    let collection = client
        .get(ctx.url("/shopping-lists/"))
        .send()
        .await
        .unwrap();
    assert_eq!(collection.status(), StatusCode::UNAUTHORIZED);

    let create = client
        .post(ctx.url("/shopping-lists/"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);

    let detail = client
        .get(ctx.url(&format!("/shopping-lists/{}/", list.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::UNAUTHORIZED);
    let body: Value = detail.json().await.unwrap();
    assert_eq!(
        body["detail"],
        "Authentication credentials were not provided."
    );
}
