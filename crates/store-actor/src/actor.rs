//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the component that owns the records of one entity
//! type. It is the "Server" side of the Actor Model: it processes requests sequentially and
//! has exclusive access to its map, so the store needs no locks.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that keeps a collection of records.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client wherever records are needed.
///
/// The loop ends once every client has been dropped.
///
/// # Implementation Details
///
/// The actor keeps a `HashMap` (`store`) from id to record and a `u32` counter (`next_id`).
/// The counter is `None` once `u32::MAX` has been handed out; ids are never reused.
///
/// * **Create**: takes the next id (or fails with `IdsExhausted`), calls
///   `T::from_create_params`, checks uniqueness against every stored record, inserts and
///   returns the new record.
/// * **Get**: returns a copy of the record, or `None`.
/// * **Find**: runs the [`FindQuery`](crate::FindQuery) over all records.
/// * **Save**: replaces an existing record after the uniqueness check. Unknown ids fail with
///   `NotFound`. The stored copy has its change tracking cleared.
/// * **Delete**: removes the record or fails with `NotFound`.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: Option<u32>,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: Some(1),
        };
        (actor, StoreClient::new(sender))
    }

    fn find_conflict(&self, candidate: &T) -> Option<String> {
        self.store
            .values()
            .filter(|other| other.id() != candidate.id())
            .find_map(|other| candidate.conflicts_with(other))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "User" instead of "catalog::model::user::User")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let Some(raw_id) = self.next_id else {
                        warn!(entity_type, "Create rejected, ids exhausted");
                        let _ = respond_to.send(Err(StoreError::IdsExhausted));
                        continue;
                    };
                    self.next_id = raw_id.checked_add(1);
                    let id = T::Id::from(raw_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(reason) = self.find_conflict(&item) {
                        warn!(entity_type, %id, reason = %reason, "Create rejected");
                        let _ = respond_to.send(Err(StoreError::Conflict(reason)));
                        continue;
                    }
                    item.clear_changes();
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Find { query, respond_to } => {
                    let items = query.apply(self.store.values());
                    debug!(entity_type, ?query, found = items.len(), "Find");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Save {
                    mut entity,
                    respond_to,
                } => {
                    let id = entity.id().clone();
                    debug!(entity_type, %id, "Save");
                    if !self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    }
                    if let Some(reason) = self.find_conflict(&entity) {
                        warn!(entity_type, %id, reason = %reason, "Save rejected");
                        let _ = respond_to.send(Err(StoreError::Conflict(reason)));
                        continue;
                    }
                    entity.clear_changes();
                    self.store.insert(id.clone(), entity);
                    info!(entity_type, %id, "Saved");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Note {
        id: u32,
    }

    impl StoreEntity for Note {
        type Id = u32;
        type Create = ();
        type Criterion = ();
        type SortKey = ();
        type Error = std::convert::Infallible;

        fn from_create_params(id: u32, _params: ()) -> Result<Self, Self::Error> {
            Ok(Self { id })
        }

        fn id(&self) -> &u32 {
            &self.id
        }

        fn matches(&self, _criterion: &()) -> bool {
            true
        }

        fn compare_by(&self, _other: &Self, _key: &()) -> std::cmp::Ordering {
            std::cmp::Ordering::Equal
        }
    }

    #[tokio::test]
    async fn test_create_refuses_once_ids_run_out() {
        let (mut actor, client) = StoreActor::<Note>::new(10);
        actor.next_id = Some(u32::MAX);
        tokio::spawn(actor.run());

        let last = client.create(()).await.unwrap();
        assert_eq!(last.id, u32::MAX);

        let result = client.create(()).await;
        assert!(matches!(result, Err(StoreError::IdsExhausted)));
        assert_eq!(client.get(u32::MAX).await.unwrap().unwrap().id, u32::MAX);
    }
}
