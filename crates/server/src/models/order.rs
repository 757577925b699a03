//! Order entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use driftline_core::{OrderId, UserId};

use crate::models::CartItem;
use crate::store::{Entity, StoreState};

/// Initial status for a freshly placed order.
pub const STATUS_PENDING: &str = "pending";

/// A placed order.
///
/// `items` is a snapshot of the cart at creation time and never changes
/// afterward. `total` is computed once, from the product prices current
/// at creation, and is not recomputed when prices move. `status` is a
/// free-form string: admins may set any value, no transition rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub status: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for an order.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub status: String,
    pub total: Decimal,
}

/// Partial update for an order: only the status is mutable.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<String>,
}

impl Entity for Order {
    type Id = OrderId;
    type Draft = OrderDraft;
    type Patch = OrderPatch;

    const COLLECTION: &'static str = "orders";

    fn generate_id() -> Self::Id {
        OrderId::generate()
    }

    fn build(id: Self::Id, now: DateTime<Utc>, draft: Self::Draft) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            items: draft.items,
            status: draft.status,
            total: draft.total,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn slot(state: &StoreState) -> &Vec<Self> {
        &state.orders
    }

    fn slot_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.orders
    }
}
