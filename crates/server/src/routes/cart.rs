//! Cart route handlers.
//!
//! All endpoints operate on the caller's own cart, created lazily on
//! first access. Lines are addressed by product id, since a cart holds
//! at most one line per product.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use driftline_core::ProductId;

use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::Cart;
use crate::state::AppState;

/// Body for adding an item to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemPayload {
    pub product_id: String,
    pub qty: u32,
}

/// Body for setting a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateLinePayload {
    pub qty: u32,
}

/// Create the cart routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show).post(add).delete(clear))
        .route("/{line_id}", put(update_line).delete(remove_line))
}

/// `GET /api/cart`
#[instrument(skip(state, user))]
pub async fn show(RequireAuth(user): RequireAuth, State(state): State<AppState>) -> Json<Cart> {
    Json(CartRepository::new(state.store()).get_or_create(&user.id))
}

/// `POST /api/cart`
///
/// Rejects products that are missing or inactive; an existing line for
/// the product is incremented instead of duplicated.
#[instrument(skip(state, user))]
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<AddItemPayload>,
) -> Result<impl IntoResponse> {
    if payload.qty == 0 {
        return Err(AppError::BadRequest("qty must be at least 1".to_owned()));
    }
    if payload.product_id.is_empty() {
        return Err(AppError::BadRequest(
            "product_id must not be empty".to_owned(),
        ));
    }

    let product_id = ProductId::from(payload.product_id);
    let product = ProductRepository::new(state.store())
        .get(&product_id)
        .filter(|p| p.active)
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let cart = CartRepository::new(state.store()).add_item(&user.id, &product.id, payload.qty);
    Ok((StatusCode::CREATED, Json(cart)))
}

/// `PUT /api/cart/{line_id}`
#[instrument(skip(state, user))]
pub async fn update_line(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(line_id): Path<String>,
    Json(payload): Json<UpdateLinePayload>,
) -> Result<Json<Cart>> {
    if payload.qty == 0 {
        return Err(AppError::BadRequest("qty must be at least 1".to_owned()));
    }

    CartRepository::new(state.store())
        .set_item_qty(&user.id, &ProductId::from(line_id), payload.qty)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Line not found".to_owned()))
}

/// `DELETE /api/cart/{line_id}`
///
/// Removing an absent line is a no-op, not an error.
#[instrument(skip(state, user))]
pub async fn remove_line(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(line_id): Path<String>,
) -> Json<Cart> {
    Json(CartRepository::new(state.store()).remove_item(&user.id, &ProductId::from(line_id)))
}

/// `DELETE /api/cart`
#[instrument(skip(state, user))]
pub async fn clear(RequireAuth(user): RequireAuth, State(state): State<AppState>) -> Json<Cart> {
    Json(CartRepository::new(state.store()).clear(&user.id))
}
