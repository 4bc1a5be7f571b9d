//! Error types for the User resource.

use crate::hashing::HashError;
use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A value outside what the field accepts, such as an unknown state code.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation cannot proceed with the data given.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Hashing(#[from] HashError),

    /// The store refused or failed the request, including email/username collisions.
    #[error("User storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => UserError::NotFound(id),
            other => UserError::Storage(other.to_string()),
        }
    }
}
