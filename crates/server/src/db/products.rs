//! Product repository.

use driftline_core::ProductId;

use crate::models::{Product, ProductDraft, ProductPatch};
use crate::store::Store;

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All active products, in insertion order.
    #[must_use]
    pub fn list_active(&self) -> Vec<Product> {
        self.store.products().find(|p| p.active)
    }

    /// Product by id, active or not.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.store.products().find_by_id(id)
    }

    /// Create a product.
    pub fn create(&self, draft: ProductDraft) -> Product {
        self.store.products().create(draft)
    }

    /// Apply a partial update; `None` when the product is unknown.
    pub fn update(&self, id: &ProductId, patch: ProductPatch) -> Option<Product> {
        self.store.products().update(id, patch)
    }

    /// Hard-delete a product. Carts and orders referencing it keep their
    /// dangling ids; totals treat those as worth zero.
    pub fn remove(&self, id: &ProductId) -> bool {
        self.store.products().remove(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use crate::store::StoreConfig;

    use super::*;

    #[test]
    fn list_active_hides_deactivated_products() {
        let store = Store::open(&StoreConfig::in_memory()).unwrap();
        let repo = ProductRepository::new(&store);

        let all = repo.list_active();
        assert_eq!(all.len(), 3);

        let first = all.first().unwrap();
        repo.update(
            &first.id,
            ProductPatch {
                active: Some(false),
                ..ProductPatch::default()
            },
        )
        .unwrap();

        assert_eq!(repo.list_active().len(), 2);
        // Still reachable by id for the admin surface.
        assert!(repo.get(&first.id).is_some());
    }

    #[test]
    fn update_validates_nothing_beyond_presence() {
        // Field-level checks live in the handlers; the repository merges
        // whatever patch it is given.
        let store = Store::open(&StoreConfig::in_memory()).unwrap();
        let repo = ProductRepository::new(&store);
        let first = repo.list_active().remove(0);

        let updated = repo
            .update(
                &first.id,
                ProductPatch {
                    price: Some(Decimal::new(999, 2)),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, Decimal::new(999, 2));
    }
}
