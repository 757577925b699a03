//! Fixed demo seed data, inserted when the principal collections are
//! empty after startup.

use rust_decimal::Decimal;

use driftline_core::Role;

use crate::models::user::DEMO_PASSWORD_SENTINEL;
use crate::models::{ProductDraft, UserDraft};

use super::Store;

/// Insert the demo catalog and admin account.
///
/// Each collection is seeded independently: a startup that loaded users
/// but no products only reseeds products. The create calls schedule the
/// flushes, so file-mode stores persist the seed like any other write.
pub(super) fn seed(store: &Store) {
    if store.products().is_empty() {
        for draft in demo_products() {
            store.products().create(draft);
        }
        tracing::info!("seeded demo products");
    }

    if store.users().is_empty() {
        store.users().create(UserDraft {
            email: driftline_core::Email::parse("admin@example.com")
                .expect("demo admin email is valid"),
            name: "Admin".to_owned(),
            role: Role::Admin,
            active: true,
            password_hash: DEMO_PASSWORD_SENTINEL.to_owned(),
        });
        tracing::info!("seeded demo admin user");
    }
}

fn demo_products() -> [ProductDraft; 3] {
    [
        ProductDraft {
            name: "Ocean Breeze T-Shirt".to_owned(),
            sku: "TSHIRT-OCEAN-001".to_owned(),
            price: Decimal::new(2499, 2),
            currency: "USD".to_owned(),
            stock: 100,
            images: vec!["/assets/products/ocean-breeze-shirt.jpg".to_owned()],
            description: "Lightweight cotton tee inspired by ocean vibes.".to_owned(),
            category: "Apparel".to_owned(),
            tags: vec!["tshirt".to_owned(), "ocean".to_owned(), "casual".to_owned()],
            active: true,
        },
        ProductDraft {
            name: "Amber Glow Hoodie".to_owned(),
            sku: "HOODIE-AMBER-002".to_owned(),
            price: Decimal::new(4999, 2),
            currency: "USD".to_owned(),
            stock: 60,
            images: vec!["/assets/products/amber-glow-hoodie.jpg".to_owned()],
            description: "Cozy hoodie with amber accent drawstrings.".to_owned(),
            category: "Apparel".to_owned(),
            tags: vec!["hoodie".to_owned(), "amber".to_owned(), "winter".to_owned()],
            active: true,
        },
        ProductDraft {
            name: "Waveform Headphones".to_owned(),
            sku: "AUDIO-WAVE-003".to_owned(),
            price: Decimal::new(8900, 2),
            currency: "USD".to_owned(),
            stock: 40,
            images: vec!["/assets/products/waveform-headphones.jpg".to_owned()],
            description: "Crisp audio with comfortable over-ear design.".to_owned(),
            category: "Electronics".to_owned(),
            tags: vec!["audio".to_owned(), "headphones".to_owned()],
            active: true,
        },
    ]
}
