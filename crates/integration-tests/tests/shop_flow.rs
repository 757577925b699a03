//! End-to-end shopper flow: register, browse the catalog, fill the
//! cart, place an order, then follow it up as the admin.

#![allow(clippy::unwrap_used)]

use driftline_integration_tests::TestContext;
use serde_json::{Value, json};

/// Register a fresh user and return their bearer token.
async fn register(ctx: &TestContext, email: &str) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({ "email": email, "password": "hunter22", "name": "Shopper" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_owned()
}

/// Login as the seeded demo admin and return the bearer token.
async fn admin_token(ctx: &TestContext) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({ "email": "admin@example.com", "password": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["user"]["role"], "admin");
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn full_shop_flow() {
    let ctx = TestContext::new().await;
    let token = register(&ctx, "flow@example.com").await;

    // Seeded catalog is visible without auth.
    let products: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 3);
    let product_id = products[0]["id"].as_str().unwrap().to_owned();

    // Add the same product twice; the line is incremented, not duplicated.
    for _ in 0..2 {
        let resp = ctx
            .client
            .post(ctx.url("/api/cart"))
            .bearer_auth(&token)
            .json(&json!({ "product_id": product_id, "qty": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let cart: Value = ctx
        .client
        .get(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["qty"], 2);

    // Bump the quantity through the line endpoint.
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/cart/{product_id}")))
        .bearer_auth(&token)
        .json(&json!({ "qty": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Place the order; the cart is cleared as a side effect.
    let resp = ctx
        .client
        .post(ctx.url("/api/orders"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["status"], "pending");
    assert_eq!(order["items"][0]["qty"], 3);
    let order_id = order["id"].as_str().unwrap().to_owned();

    let cart: Value = ctx
        .client
        .get(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["items"].as_array().unwrap().is_empty());

    let mine: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/orders"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);

    // Admin marks the order shipped.
    let admin = admin_token(&ctx).await;
    let resp = ctx
        .client
        .patch(ctx.url(&format!("/api/admin/orders/{order_id}")))
        .bearer_auth(&admin)
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["status"], "shipped");
}

#[tokio::test]
async fn cart_rejects_unknown_products_and_lines() {
    let ctx = TestContext::new().await;
    let token = register(&ctx, "edge@example.com").await;

    let resp = ctx
        .client
        .post(ctx.url("/api/cart"))
        .bearer_auth(&token)
        .json(&json!({ "product_id": "prod_missing", "qty": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = ctx
        .client
        .put(ctx.url("/api/cart/prod_missing"))
        .bearer_auth(&token)
        .json(&json!({ "qty": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Line not found");
}

#[tokio::test]
async fn ordering_an_empty_cart_yields_a_zero_total() {
    let ctx = TestContext::new().await;
    let token = register(&ctx, "empty@example.com").await;

    let resp = ctx
        .client
        .post(ctx.url("/api/orders"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let order: Value = resp.json().await.unwrap();
    assert!(order["items"].as_array().unwrap().is_empty());
    assert_eq!(order["total"], "0");
}
