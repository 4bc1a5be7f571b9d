//! # StoreEntity Trait
//!
//! The `StoreEntity` trait is the contract every persisted record (Product, User, …) implements
//! to be kept by the generic [`StoreActor`](crate::StoreActor). It names the id type, the
//! creation payload, the typed lookup criteria and sort keys, and the error type, and it lets
//! the store ask a record about itself (identity, criteria matching, ordering, uniqueness).
//!
//! # Architecture Note
//! The store never knows about concrete fields. Everything it needs to answer
//! `find(criteria, ordering, limit, offset)` is expressed through
//! [`StoreEntity::matches`] and [`StoreEntity::compare_by`], so the same actor loop serves
//! every resource type.
//!
//! Associated types keep the requests type-safe: a `User` store accepts `UserCriterion`s and
//! a `Product` store accepts `ProductCriterion`s, and mixing them up does not compile.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted record must implement to be managed by a `StoreActor`.
pub trait StoreEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this record.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// A single lookup condition (e.g. "email equals x"). Criteria in a query are AND-ed.
    type Criterion: Send + Sync + Debug;

    /// A field the store can order results by.
    type SortKey: Send + Sync + Debug;

    /// The error type returned when a record cannot be built.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the generated ID and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The identity of this record.
    fn id(&self) -> &Self::Id;

    /// Whether this record satisfies `criterion`.
    fn matches(&self, criterion: &Self::Criterion) -> bool;

    /// Ordering of `self` relative to `other` on a single sort key, ascending.
    fn compare_by(&self, other: &Self, key: &Self::SortKey) -> Ordering;

    /// Describes why `self` cannot coexist with `other` (e.g. a duplicated unique column).
    ///
    /// The store calls this against every other record on create and save.
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }

    /// Drops in-memory change tracking before the record is stored.
    ///
    /// Records handed out by the store are always clean copies.
    fn clear_changes(&mut self) {}
}
