//! Order repository.

use rust_decimal::Decimal;

use driftline_core::{OrderId, UserId};

use crate::models::{Order, OrderDraft, OrderPatch, order::STATUS_PENDING};
use crate::store::Store;

use super::CartRepository;

/// Repository for placed orders.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All orders, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.store.orders().all()
    }

    /// Orders belonging to one user, in insertion order.
    #[must_use]
    pub fn list_for_user(&self, user_id: &UserId) -> Vec<Order> {
        self.store.orders().find(|o| &o.user_id == user_id)
    }

    /// Order by id.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.store.orders().find_by_id(id)
    }

    /// Place an order from the user's current cart.
    ///
    /// The cart lines are copied verbatim into a new pending order. The
    /// total is the sum of qty times the product's price at this moment;
    /// a product that no longer exists contributes zero rather than
    /// failing the order. Clears the source cart as a side effect. An
    /// empty cart still yields an (empty, zero-total) order.
    pub fn create_from_cart(&self, user_id: &UserId) -> Order {
        let carts = CartRepository::new(self.store);
        let cart = carts.get_or_create(user_id);

        let products = self.store.products();
        let total = cart.items.iter().fold(Decimal::ZERO, |sum, item| {
            products
                .find_by_id(&item.product_id)
                .map_or(sum, |p| sum + p.price * Decimal::from(item.qty))
        });

        let order = self.store.orders().create(OrderDraft {
            user_id: user_id.clone(),
            items: cart.items,
            status: STATUS_PENDING.to_owned(),
            total,
        });

        carts.clear(user_id);
        order
    }

    /// Overwrite the order status. Any string is accepted; there is no
    /// transition validation. `None` when the order is unknown.
    pub fn update_status(&self, id: &OrderId, status: String) -> Option<Order> {
        self.store.orders().update(
            id,
            OrderPatch {
                status: Some(status),
            },
        )
    }
}
