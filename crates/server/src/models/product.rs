//! Product catalog entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use driftline_core::ProductId;

use crate::store::{Entity, StoreState};

/// A catalog product.
///
/// Invariants: `price >= 0` and `stock >= 0`, enforced by the handlers
/// before a draft or patch reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    /// Short currency code, e.g. "USD".
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
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub currency: String,
    pub stock: u32,
    pub images: Vec<String>,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub active: bool,
}

/// Partial update for a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
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

impl ProductPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.price.is_none()
            && self.currency.is_none()
            && self.stock.is_none()
            && self.images.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.active.is_none()
    }
}

impl Entity for Product {
    type Id = ProductId;
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    const COLLECTION: &'static str = "products";

    fn generate_id() -> Self::Id {
        ProductId::generate()
    }

    fn build(id: Self::Id, now: DateTime<Utc>, draft: Self::Draft) -> Self {
        Self {
            id,
            name: draft.name,
            sku: draft.sku,
            price: draft.price,
            currency: draft.currency,
            stock: draft.stock,
            images: draft.images,
            description: draft.description,
            category: draft.category,
            tags: draft.tags,
            active: draft.active,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn slot(state: &StoreState) -> &Vec<Self> {
        &state.products
    }

    fn slot_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.products
    }
}
