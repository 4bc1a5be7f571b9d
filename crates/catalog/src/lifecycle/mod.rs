//! Lifecycle management for the catalog.
//!
//! This module provides orchestration logic for starting, running, and shutting down
//! the store actors behind the facades.

pub mod catalog_system;

pub use catalog_system::CatalogSystem;
