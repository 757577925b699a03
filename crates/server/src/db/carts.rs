//! Cart repository.

use driftline_core::{ProductId, UserId};

use crate::models::{Cart, CartDraft, CartItem, CartPatch};
use crate::store::Store;

/// Repository for per-user shopping carts.
pub struct CartRepository<'a> {
    store: &'a Store,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The user's cart, created empty on first access. Idempotent: a
    /// second call returns the same cart.
    pub fn get_or_create(&self, user_id: &UserId) -> Cart {
        self.store
            .carts()
            .find_one(|c| &c.user_id == user_id)
            .unwrap_or_else(|| {
                self.store.carts().create(CartDraft {
                    user_id: user_id.clone(),
                })
            })
    }

    /// Add `qty` of a product to the user's cart. An existing line for
    /// the product is incremented (saturating at `u32::MAX`); otherwise
    /// a new line is appended, so the cart never holds two lines for
    /// one product.
    pub fn add_item(&self, user_id: &UserId, product_id: &ProductId, qty: u32) -> Cart {
        let cart = self.get_or_create(user_id);
        let mut items = cart.items.clone();
        if let Some(line) = items.iter_mut().find(|i| &i.product_id == product_id) {
            line.qty = line.qty.saturating_add(qty);
        } else {
            items.push(CartItem {
                product_id: product_id.clone(),
                qty,
            });
        }
        self.replace_items(cart, items)
    }

    /// Set the quantity of an existing line. Returns `None` when the
    /// cart has no line for the product.
    pub fn set_item_qty(&self, user_id: &UserId, product_id: &ProductId, qty: u32) -> Option<Cart> {
        let cart = self.get_or_create(user_id);
        let mut items = cart.items.clone();
        let line = items.iter_mut().find(|i| &i.product_id == product_id)?;
        line.qty = qty;
        Some(self.replace_items(cart, items))
    }

    /// Remove the line for a product, if present.
    pub fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> Cart {
        let cart = self.get_or_create(user_id);
        let items: Vec<CartItem> = cart
            .items
            .iter()
            .filter(|i| &i.product_id != product_id)
            .cloned()
            .collect();
        self.replace_items(cart, items)
    }

    /// Empty the items list; the cart record itself stays.
    pub fn clear(&self, user_id: &UserId) -> Cart {
        let cart = self.get_or_create(user_id);
        self.replace_items(cart, Vec::new())
    }

    fn replace_items(&self, cart: Cart, items: Vec<CartItem>) -> Cart {
        self.store
            .carts()
            .update(&cart.id, CartPatch { items: Some(items) })
            // Carts are never deleted, so the id is still present; fall
            // back to the copy we read if a racing writer proves us wrong.
            .unwrap_or(cart)
    }
}
