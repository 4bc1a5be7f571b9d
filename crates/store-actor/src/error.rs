//! # Store Errors
//!
//! This module defines the error type shared by every store actor and client.
//! Resource wrappers map it onto their own error enums.

/// Errors that can occur within the store actor itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record conflicts with an existing one: {0}")]
    Conflict(String),
    #[error("No record ids left")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
