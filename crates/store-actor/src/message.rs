//! # Store Messages
//!
//! This module defines the request type sent from a `StoreClient` to its `StoreActor`.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::query::FindQuery;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to the store actor.
///
/// The variants are the operations a persistence layer offers a facade:
///
/// - **Create**: builds a record from [`StoreEntity::Create`] under a fresh id and returns it.
/// - **Get**: load by identity; `None` when absent.
/// - **Find**: load by criteria with ordering, limit and offset.
/// - **Save**: replace an existing record with a modified copy.
/// - **Delete**: remove by identity.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        query: FindQuery<T>,
        respond_to: Response<Vec<T>>,
    },
    Save {
        entity: T,
        respond_to: Response<()>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
