//! Resource facades: the operations a transport layer calls.
//!
//! Each facade wraps a store client, implements [`ResourceClient`](store_actor::ResourceClient)
//! and projects entities into response views.

pub mod products_facade;
pub mod users_facade;

pub use products_facade::ProductsFacade;
pub use users_facade::UsersFacade;
