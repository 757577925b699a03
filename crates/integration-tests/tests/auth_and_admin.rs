//! Authentication and admin-surface behavior over HTTP.

#![allow(clippy::unwrap_used)]

use driftline_integration_tests::TestContext;
use serde_json::{Value, json};

async fn register(ctx: &TestContext, email: &str) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({ "email": email, "password": "hunter22" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_owned()
}

async fn admin_token(ctx: &TestContext) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({ "email": "admin@example.com", "password": "admin" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn register_validates_input_and_rejects_duplicates() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({ "email": "not-an-email", "password": "hunter22" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({ "email": "short@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("6 characters"));

    register(&ctx, "dup@example.com").await;
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({ "email": "dup@example.com", "password": "hunter22" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/api/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let token = register(&ctx, "me@example.com").await;
    let resp = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn admin_endpoints_reject_regular_users() {
    let ctx = TestContext::new().await;
    let token = register(&ctx, "pleb@example.com").await;

    let resp = ctx
        .client
        .get(ctx.url("/api/admin/users"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = ctx
        .client
        .post(ctx.url("/api/admin/products"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Nope", "sku": "NO-1", "price": 1, "currency": "USD", "stock": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn admin_manages_products_end_to_end() {
    let ctx = TestContext::new().await;
    let admin = admin_token(&ctx).await;

    // Create through the admin prefix.
    let resp = ctx
        .client
        .post(ctx.url("/api/admin/products"))
        .bearer_auth(&admin)
        .json(&json!({
            "name": "Tidal Poster",
            "sku": "POSTER-TIDE-004",
            "price": 14.5,
            "currency": "USD",
            "stock": 25
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let product: Value = resp.json().await.unwrap();
    let id = product["id"].as_str().unwrap().to_owned();
    assert_eq!(product["active"], true);

    // Update through the mirror path the frontend uses.
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/products/admin/{id}")))
        .bearer_auth(&admin)
        .json(&json!({ "stock": 24, "active": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["stock"], 24);
    assert_eq!(updated["active"], false);

    // Deactivated products 404 publicly but remain fetchable nowhere.
    let resp = ctx
        .client
        .get(ctx.url(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Empty update bodies are rejected.
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/admin/products/{id}")))
        .bearer_auth(&admin)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Delete, then the update 404s.
    let resp = ctx
        .client
        .delete(ctx.url(&format!("/api/admin/products/{id}")))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/admin/products/{id}")))
        .bearer_auth(&admin)
        .json(&json!({ "stock": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn admin_user_listing_is_sanitized() {
    let ctx = TestContext::new().await;
    register(&ctx, "listed@example.com").await;
    let admin = admin_token(&ctx).await;

    let resp = ctx
        .client
        .get(ctx.url("/api/admin/users"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let users: Vec<Value> = resp.json().await.unwrap();
    assert!(users.len() >= 2);
    for user in &users {
        assert!(user.get("password_hash").is_none());
        assert!(user["active"].is_boolean());
    }
}

#[tokio::test]
async fn order_status_update_requires_a_status() {
    let ctx = TestContext::new().await;
    let admin = admin_token(&ctx).await;

    let resp = ctx
        .client
        .patch(ctx.url("/api/admin/orders/ord_missing"))
        .bearer_auth(&admin)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "status is required");

    let resp = ctx
        .client
        .patch(ctx.url("/api/admin/orders/ord_missing"))
        .bearer_auth(&admin)
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
