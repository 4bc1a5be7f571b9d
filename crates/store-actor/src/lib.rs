//! # Store Actor
//!
//! This crate provides a small, type-safe persistence layer built on the **Actor Model**.
//! Each record type gets one [`StoreActor`]: a Tokio task that exclusively owns an in-memory
//! map of records and answers create / get / find / save / delete requests sent through a
//! cloneable [`StoreClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - what a record is: id, creation payload, lookup
//!    criteria, sort keys, uniqueness
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing and the record map
//! 3. **Interface Layer** ([`StoreClient`], [`ResourceClient`]) - typed requests, and the
//!    trait resource facades implement to get `load` / `remove` for free
//!
//! Lookups are described by a [`FindQuery`]: AND-ed criteria, ordering with
//! [`Direction`], limit (default 10) and offset.
//!
//! ## Example
//!
//! ```rust
//! use std::cmp::Ordering;
//! use store_actor::{FindQuery, StoreActor, StoreEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Tag {
//!     id: u32,
//!     label: String,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("tag error")]
//! struct TagError;
//!
//! impl StoreEntity for Tag {
//!     type Id = u32;
//!     type Create = String;
//!     type Criterion = String;
//!     type SortKey = ();
//!     type Error = TagError;
//!
//!     fn from_create_params(id: u32, label: String) -> Result<Self, TagError> {
//!         Ok(Self { id, label })
//!     }
//!     fn id(&self) -> &u32 { &self.id }
//!     fn matches(&self, label: &String) -> bool { &self.label == label }
//!     fn compare_by(&self, _: &Self, _: &()) -> Ordering { Ordering::Equal }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Tag>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let tag = client.create("rust".into()).await.unwrap();
//!     assert_eq!(tag.id, 1);
//!
//!     let found = client
//!         .find(FindQuery::new().filter("rust".to_string()))
//!         .await
//!         .unwrap();
//!     assert_eq!(found.len(), 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Requests are processed **sequentially** within a store (no locks needed!)
//! - Different stores run in **parallel**
//! - A load-modify-save sequence issued by a caller is not atomic: two concurrent saves of the
//!   same record are last-write-wins
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, which answers a real `StoreClient` from a
//! queue of expectations and records which requests arrived.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::ResourceClient;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use query::{Direction, FindQuery};
