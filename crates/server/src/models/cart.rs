//! Shopping cart entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use driftline_core::{CartId, ProductId, UserId};

use crate::store::{Entity, StoreState};

/// One line in a cart.
///
/// A cart holds at most one line per product; adding an existing product
/// increments `qty` instead of appending a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    /// Always >= 1; a line is removed rather than zeroed out.
    pub qty: u32,
}

/// A per-user shopping cart, created lazily on first access.
///
/// Line order is insertion order and is preserved across snapshots.
/// Product references are weak: a deleted product leaves a dangling
/// `product_id` behind, which order totals treat as worth zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a cart. Carts start empty.
#[derive(Debug, Clone)]
pub struct CartDraft {
    pub user_id: UserId,
}

/// Partial update for a cart: the whole items list is replaced at once.
#[derive(Debug, Clone, Default)]
pub struct CartPatch {
    pub items: Option<Vec<CartItem>>,
}

impl Entity for Cart {
    type Id = CartId;
    type Draft = CartDraft;
    type Patch = CartPatch;

    const COLLECTION: &'static str = "carts";

    fn generate_id() -> Self::Id {
        CartId::generate()
    }

    fn build(id: Self::Id, now: DateTime<Utc>, draft: Self::Draft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(items) = patch.items {
            self.items = items;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn slot(state: &StoreState) -> &Vec<Self> {
        &state.carts
    }

    fn slot_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.carts
    }
}
