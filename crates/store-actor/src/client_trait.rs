//! # ResourceClient Trait
//!
//! Provides a common interface for resource‑specific wrappers (facades), adding default
//! `load` and `remove` methods on top of a generic `StoreClient`.
use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;

/// Trait for resource-specific wrappers to inherit the identity-based operations.
///
/// Implementors supply the inner client and two error conversions; `load` and `remove`
/// then fail with the resource's own not-found error when the id is unknown.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ResourceClient<Product> for ProductsFacade {
///     type Error = ProductError;
///
///     fn inner(&self) -> &StoreClient<Product> { &self.store }
///     fn not_found(id: &ProductId) -> ProductError { ProductError::NotFound(id.to_string()) }
///     fn map_error(e: StoreError) -> ProductError { /* ... */ }
/// }
///
/// let product = facade.load(ProductId(9)).await?; // Err(ProductError::NotFound) when absent
/// ```
#[async_trait]
pub trait ResourceClient<T: StoreEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Error reported when no record has the given id.
    fn not_found(id: &T::Id) -> Self::Error;

    /// Map store errors to the specific resource error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by ID, failing when absent.
    #[tracing::instrument(skip(self))]
    async fn load(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        match self.inner().get(id.clone()).await {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => Err(Self::not_found(&id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Delete a record by ID, failing when absent.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
