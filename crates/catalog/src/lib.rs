//! # Catalog
//!
//! Products and users kept by [`store_actor`] stores, with partial updates that only touch
//! what the client actually sent.
//!
//! ## Core Components
//!
//! - **[model]**: Entities ([`Product`](model::Product), [`User`](model::User)) that record
//!   which fields changed, update requests built from [`Patch`](model::Patch) fields, and
//!   response views.
//! - **[product_store] / [user_store]**: `StoreEntity` implementations, lookup criteria,
//!   sort keys and per-resource errors.
//! - **[facades]**: [`ProductsFacade`](facades::ProductsFacade) and
//!   [`UsersFacade`](facades::UsersFacade), the operations a transport layer calls.
//! - **[hashing]**: the injected [`PasswordHasher`](hashing::PasswordHasher).
//! - **[api]**: JSON body parsing, validation, and error to status mapping.
//! - **[lifecycle]**: [`CatalogSystem`](lifecycle::CatalogSystem) starts and stops the stores.
//!
//! ## Partial updates
//!
//! A field left out of an update request is never applied. A field sent as `null` is
//! skipped as well. A supplied value equal to the current one is skipped, so an entity is
//! written back (and `updated_at` moves) only when at least one field really changed.
//!
//! ## Testing
//!
//! See [`store_actor::mock`] for utilities to test facades without spawning stores.

pub mod api;
pub mod config;
pub mod facades;
pub mod hashing;
pub mod lifecycle;
pub mod model;
pub mod product_store;
pub mod user_store;
