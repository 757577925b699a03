//! HTTP route handlers for the REST surface.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                          - Health check
//!
//! # Auth
//! POST   /api/auth/register         - Register a new user (201)
//! POST   /api/auth/login            - Login, issue bearer token
//! GET    /api/auth/me               - Current user profile (auth)
//!
//! # Products (public)
//! GET    /api/products              - List active products
//! GET    /api/products/{id}         - Product detail (404 if inactive)
//!
//! # Cart (auth)
//! GET    /api/cart                  - Current user's cart
//! POST   /api/cart                  - Add item {product_id, qty} (201)
//! PUT    /api/cart/{line_id}        - Set line quantity (line = product id)
//! DELETE /api/cart/{line_id}        - Remove line
//! DELETE /api/cart                  - Clear cart
//!
//! # Orders (auth)
//! POST   /api/orders                - Create order from cart (201)
//! GET    /api/orders                - List current user's orders
//!
//! # Admin (auth + admin role)
//! GET    /api/admin/users           - List users (sanitized)
//! POST   /api/admin/products        - Create product
//! PUT    /api/admin/products/{id}   - Update product
//! DELETE /api/admin/products/{id}   - Delete product (204)
//! GET    /api/admin/orders          - List all orders
//! PATCH  /api/admin/orders/{id}     - Update order status
//!
//! The admin product/order operations are mirrored under the public
//! prefixes (`/api/products/admin/...`, `/api/orders/admin/...`) to
//! match the paths the frontend already uses.
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/products", products::router())
        .nest("/api/cart", cart::router())
        .nest("/api/orders", orders::router())
        .nest("/api/admin", admin::router())
}
