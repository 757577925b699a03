//! Product catalog route handlers.
//!
//! The public endpoints only ever expose active products; deactivated
//! ones 404 just like deleted ones. The admin create/update/delete
//! handlers live here and are mounted both under `/api/products/admin`
//! and `/api/admin/products`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use driftline_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::models::{Product, ProductDraft, ProductPatch};
use crate::state::AppState;

/// Maximum accepted currency-code length.
const MAX_CURRENCY_LENGTH: usize = 6;

/// Product creation request body. All fields the catalog requires are
/// mandatory; presentation fields default to empty.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub currency: String,
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub active: Option<bool>,
}

impl ProductPayload {
    fn into_draft(self) -> Result<ProductDraft> {
        validate_name(&self.name)?;
        validate_sku(&self.sku)?;
        validate_price(self.price)?;
        validate_currency(&self.currency)?;
        Ok(ProductDraft {
            name: self.name,
            sku: self.sku,
            price: self.price,
            currency: self.currency,
            stock: self.stock,
            images: self.images,
            description: self.description,
            category: self.category,
            tags: self.tags,
            active: self.active.unwrap_or(true),
        })
    }
}

/// Product update request body. Every field is optional, but at least
/// one must be present.
#[derive(Debug, Default, Deserialize)]
pub struct ProductUpdatePayload {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub active: Option<bool>,
}

impl ProductUpdatePayload {
    fn into_patch(self) -> Result<ProductPatch> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(sku) = &self.sku {
            validate_sku(sku)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(currency) = &self.currency {
            validate_currency(currency)?;
        }
        let patch = ProductPatch {
            name: self.name,
            sku: self.sku,
            price: self.price,
            currency: self.currency,
            stock: self.stock,
            images: self.images,
            description: self.description,
            category: self.category,
            tags: self.tags,
            active: self.active,
        };
        if patch.is_empty() {
            return Err(AppError::BadRequest(
                "at least one field must be provided".to_owned(),
            ));
        }
        Ok(patch)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }
    Ok(())
}

fn validate_sku(sku: &str) -> Result<()> {
    if sku.is_empty() {
        return Err(AppError::BadRequest("sku must not be empty".to_owned()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price.is_sign_negative() {
        return Err(AppError::BadRequest(
            "price must not be negative".to_owned(),
        ));
    }
    Ok(())
}

fn validate_currency(currency: &str) -> Result<()> {
    if currency.is_empty() || currency.len() > MAX_CURRENCY_LENGTH {
        return Err(AppError::BadRequest(format!(
            "currency must be 1 to {MAX_CURRENCY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Create the product routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}", get(show))
        // Admin mirror kept at the paths the frontend calls.
        .route("/admin", post(admin_create))
        .route("/admin/{id}", put(admin_update).delete(admin_remove))
}

/// `GET /api/products`
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(ProductRepository::new(state.store()).list_active())
}

/// `GET /api/products/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.store())
        .get(&ProductId::from(id))
        .filter(|p| p.active)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Not found".to_owned()))
}

/// `POST /api/products/admin` and `POST /api/admin/products`
#[instrument(skip(state, payload))]
pub async fn admin_create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse> {
    let draft = payload.into_draft()?;
    let product = ProductRepository::new(state.store()).create(draft);
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/admin/{id}` and `PUT /api/admin/products/{id}`
#[instrument(skip(state, payload))]
pub async fn admin_update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdatePayload>,
) -> Result<Json<Product>> {
    let patch = payload.into_patch()?;
    ProductRepository::new(state.store())
        .update(&ProductId::from(id), patch)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Not found".to_owned()))
}

/// `DELETE /api/products/admin/{id}` and `DELETE /api/admin/products/{id}`
#[instrument(skip(state))]
pub async fn admin_remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if ProductRepository::new(state.store()).remove(&ProductId::from(id)) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Not found".to_owned()))
    }
}
