//! # User Store
//!
//! Wires the [`User`] entity into a [`StoreActor`].
//!
//! - [`entity`] - [`StoreEntity`](store_actor::StoreEntity) implementation for [`User`],
//!   with [`UserCriterion`], [`UserSortKey`] and the email/username uniqueness rule
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::model::User;
use store_actor::{StoreActor, StoreClient};

/// Creates a new User store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<User>, StoreClient<User>) {
    StoreActor::new(buffer_size)
}
