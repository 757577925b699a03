//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use tracing::instrument;

use driftline_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireAuth};
use crate::models::Order;
use crate::state::AppState;

/// Body for an admin status update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

/// Create the order routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create).get(list_mine))
        // Admin mirror kept at the paths the frontend calls.
        .route("/admin", get(admin_list))
        .route("/admin/{id}", patch(admin_update_status))
}

/// `POST /api/orders`
///
/// Places an order from the caller's cart and clears the cart. An
/// empty cart still yields an empty, zero-total order.
#[instrument(skip(state, user))]
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let order = OrderRepository::new(state.store()).create_from_cart(&user.id);
    (StatusCode::CREATED, Json(order))
}

/// `GET /api/orders`
#[instrument(skip(state, user))]
pub async fn list_mine(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Json<Vec<Order>> {
    Json(OrderRepository::new(state.store()).list_for_user(&user.id))
}

/// `GET /api/orders/admin` and `GET /api/admin/orders`
#[instrument(skip(state))]
pub async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Json<Vec<Order>> {
    Json(OrderRepository::new(state.store()).list())
}

/// `PATCH /api/orders/admin/{id}` and `PATCH /api/admin/orders/{id}`
///
/// The status is a free-form string; no transition rules are applied.
#[instrument(skip(state, payload))]
pub async fn admin_update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<Order>> {
    let status = payload
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("status is required".to_owned()))?;

    OrderRepository::new(state.store())
        .update_status(&OrderId::from(id), status)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Not found".to_owned()))
}
