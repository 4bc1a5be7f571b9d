//! # Mock Store & Testing Guide
//!
//! `MockClient<T>` hands out a real `StoreClient<T>` whose requests are answered from a queue
//! of expectations instead of a store. It lets a facade be tested without spawning an actor,
//! and makes "no write happened" observable: every request is recorded in [`MockClient::calls`],
//! and a request that was not expected fails the mock task.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real records |
//! | **Use Case** | Orchestration logic *around* the client | The store itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Product>::new();
//! mock.expect_get(ProductId(9)).return_ok(None);
//!
//! let facade = ProductsFacade::new(mock.client());
//! assert!(matches!(facade.update(ProductId(9), patch).await, Err(ProductError::NotFound(_))));
//!
//! mock.verify();                           // every expectation consumed
//! assert_eq!(mock.calls(), vec!["get"]);   // and nothing was saved
//! ```
//!
//! ## Lower-level helpers
//!
//! [`create_mock_client`] returns a client plus the raw request receiver; the `expect_*`
//! functions pull the next request off it so a test can inspect the payload and answer it.

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::query::FindQuery;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock client and the response to give it.
enum Expectation<T: StoreEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Find {
        response: Result<Vec<T>, StoreError>,
    },
    Save {
        response: Result<(), StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let calls_clone = calls.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&expectations_clone).pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        lock(&calls_clone).push("get");
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        lock(&calls_clone).push("create");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Find { respond_to, .. },
                        Some(Expectation::Find { response }),
                    ) => {
                        lock(&calls_clone).push("find");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Save { respond_to, .. },
                        Some(Expectation::Save { response }),
                    ) => {
                        lock(&calls_clone).push("save");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        lock(&calls_clone).push("delete");
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        lock(&calls_clone).push(request_name(&request));
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            calls,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Names of the requests received so far, in order ("get", "save", ...).
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::Get { id, response }
        })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    /// Expects a `find` operation.
    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Find { response })
    }

    /// Expects a `save` operation.
    pub fn expect_save(&mut self) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Save { response })
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::Delete { id, response }
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

fn request_name<T: StoreEntity>(request: &StoreRequest<T>) -> &'static str {
    match request {
        StoreRequest::Create { .. } => "create",
        StoreRequest::Get { .. } => "get",
        StoreRequest::Find { .. } => "find",
        StoreRequest::Save { .. } => "save",
        StoreRequest::Delete { .. } => "delete",
    }
}

/// Builder that records the response for one expected request.
pub struct ExpectationBuilder<T: StoreEntity, R: 'static> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: StoreEntity, R: 'static> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        let expectation = (self.make)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests with the `expect_*` helpers, asserts on their
/// payloads and answers through the returned responder.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(FindQuery<T>, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<(), StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Save { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    impl StoreEntity for Note {
        type Id = u32;
        type Create = String;
        type Criterion = ();
        type SortKey = ();
        type Error = NoteError;

        fn from_create_params(id: u32, text: String) -> Result<Self, Self::Error> {
            Ok(Self { id, text })
        }
        fn id(&self) -> &u32 {
            &self.id
        }
        fn matches(&self, _: &()) -> bool {
            true
        }
        fn compare_by(&self, _: &Self, _: &()) -> Ordering {
            Ordering::Equal
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let save_task = tokio::spawn(async move {
            client
                .save(Note {
                    id: 3,
                    text: "draft".into(),
                })
                .await
        });

        let (entity, responder) = expect_save(&mut receiver)
            .await
            .expect("Expected Save request");
        assert_eq!(entity.id, 3);
        assert_eq!(entity.text, "draft");
        responder.send(Ok(())).unwrap();

        assert!(save_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_create().return_ok(Note {
            id: 1,
            text: "hello".into(),
        });
        mock.expect_get(1).return_ok(None);
        mock.expect_delete(1)
            .return_err(StoreError::NotFound("1".into()));

        let client = mock.client();
        let created = client.create("hello".into()).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(client.get(1).await.unwrap().is_none());
        assert!(matches!(
            client.delete(1).await,
            Err(StoreError::NotFound(_))
        ));

        mock.verify();
        assert_eq!(mock.calls(), vec!["create", "get", "delete"]);
    }

    #[tokio::test]
    async fn test_unexpected_request_is_recorded_and_fails() {
        let mock = MockClient::<Note>::new();
        let result = mock.client().find(FindQuery::new()).await;

        assert!(matches!(result, Err(StoreError::ActorDropped)));
        assert_eq!(mock.calls(), vec!["find"]);
    }
}
