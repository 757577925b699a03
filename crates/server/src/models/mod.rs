//! Domain entities stored by the record store.
//!
//! Each entity is an explicit struct with an `id` and creation/update
//! timestamps, plus a `Draft` type for creation payloads and a `Patch`
//! type for partial-field merges. The [`crate::store::Entity`] impls
//! bind each entity to its collection.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartDraft, CartItem, CartPatch};
pub use order::{Order, OrderDraft, OrderPatch};
pub use product::{Product, ProductDraft, ProductPatch};
pub use user::{User, UserDraft, UserPatch};
