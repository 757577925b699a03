//! Domain repositories: thin typed facades over the record store that
//! expose domain verbs instead of raw collection CRUD.
//!
//! Repositories hold no state of their own, just a borrowed [`Store`]
//! handle, so constructing one is free and tests can point them at a
//! fresh in-memory store. Absence is signalled with `Option`/`bool`;
//! the handlers above translate that into 404s.
//!
//! [`Store`]: crate::store::Store

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;
