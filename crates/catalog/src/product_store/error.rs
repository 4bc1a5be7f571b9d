//! Error types for the Product resource.

use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The store refused or failed the request.
    #[error("Product storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ProductError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::Storage(other.to_string()),
        }
    }
}
