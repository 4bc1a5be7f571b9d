//! # Product Store
//!
//! Wires the [`Product`] entity into a [`StoreActor`].
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](store_actor::StoreEntity) implementation for [`Product`],
//!   with [`ProductCriterion`] and [`ProductSortKey`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use catalog::model::CreateProductRequest;
//! use catalog::product_store;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = product_store::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let product = client
//!         .create(CreateProductRequest { name: "Mug".into(), price: 4.5 })
//!         .await
//!         .unwrap();
//!     assert_eq!(product.id().to_string(), "product_1");
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::model::Product;
use store_actor::{StoreActor, StoreClient};

/// Creates a new Product store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Product>, StoreClient<Product>) {
    StoreActor::new(buffer_size)
}
