//! Admin route handlers.
//!
//! Everything here requires the admin role. Product and order
//! management reuse the handlers from [`super::products`] and
//! [`super::orders`]; the user listing is the only admin-only view.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, patch, post, put},
};
use serde::Serialize;
use tracing::instrument;

use crate::db::UserRepository;
use crate::middleware::auth::RequireAdmin;
use crate::models::User;
use crate::state::AppState;

use super::{orders, products};

/// Admin view of a user: the public fields plus the active flag.
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
    pub active: bool,
}

impl From<User> for AdminUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: user.email.into_inner(),
            role: user.role.as_str().to_owned(),
            name: user.name,
            active: user.active,
        }
    }
}

/// Create the admin routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/products", post(products::admin_create))
        .route(
            "/products/{id}",
            put(products::admin_update).delete(products::admin_remove),
        )
        .route("/orders", get(orders::admin_list))
        .route("/orders/{id}", patch(orders::admin_update_status))
}

/// `GET /api/admin/users`
#[instrument(skip(state))]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Json<Vec<AdminUserResponse>> {
    Json(
        UserRepository::new(state.store())
            .list()
            .into_iter()
            .map(AdminUserResponse::from)
            .collect(),
    )
}
