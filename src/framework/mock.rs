//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of expectations instead of a running actor. It is the way to test code that
//! sits *on top of* clients (typed client wrappers, the order service) without spawning
//! the actors behind them.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real store |
//! | **Error injection** | `return_err(...)` | Needs a crafted store |
//! | **Use case** | Logic around the client | The actor or the whole system |
//!
//! ## Strict ordering
//!
//! Expectations are consumed in the order they were registered. A request that does not
//! match the next expectation (wrong kind or wrong id) makes the mock task panic, which
//! drops the responder and surfaces at the call site as [`FrameworkError::ActorDropped`].
//! Call [`MockClient::verify`] at the end of a test to check nothing was left unconsumed.
//!
//! ```rust
//! use order_service::framework::mock::MockClient;
//! use order_service::model::{Customer, CustomerId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Customer>::new();
//!     mock.expect_get(CustomerId::from("C1"))
//!         .return_ok(Some(Customer::new("C1", "Alice", "alice@example.com")));
//!
//!     let client = mock.client();
//!     let customer = client.get(CustomerId::from("C1")).await.unwrap();
//!     assert_eq!(customer.unwrap().name, "Alice");
//!     mock.verify();
//! }
//! ```
//!
//! ## Raw receiver helpers
//!
//! When a test needs to inspect the payload that was sent (for example the amount in a
//! stock action), use [`create_mock_client`] together with [`expect_action`] and friends,
//! and answer each request by hand through its responder.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer to one expected request.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    FindMany {
        ids: Vec<T::Id>,
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime: the scripted answers are served from a
    /// spawned task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::FindMany { ids, respond_to },
                        Some(Expectation::FindMany { ids: expected, response }),
                    ) => {
                        assert_eq!(ids, expected, "find_many called with unexpected ids");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "action sent to unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `find_many` operation with exactly these ids, in this order.
    pub fn expect_find_many(&mut self, ids: Vec<T::Id>) -> FindManyExpectationBuilder<T> {
        FindManyExpectationBuilder {
            ids,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response,
        });
    }
}

/// Builder for `find_many` expectations.
pub struct FindManyExpectationBuilder<T: ActorEntity> {
    ids: Vec<T::Id>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> FindManyExpectationBuilder<T> {
    pub fn return_ok(self, found: Vec<T>) {
        self.push(Ok(found));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<T>, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::FindMany {
                ids: self.ids,
                response,
            });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        self.push(Ok(id));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::Id, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.push(Ok(result));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::ActionResult, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response,
        });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindMany request
pub async fn expect_find_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, CustomerCreate, CustomerId};

    #[tokio::test]
    async fn test_raw_create_round_trip() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CustomerCreate {
                    name: "Test".to_string(),
                    email: "test@example.com".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        responder.send(Ok(CustomerId::from("customer_1"))).unwrap();

        let id = create_task.await.unwrap().unwrap();
        assert_eq!(id, CustomerId::from("customer_1"));
    }

    #[tokio::test]
    async fn test_scripted_expectations() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_create().return_ok(CustomerId::from("customer_1"));
        mock.expect_get(CustomerId::from("customer_1"))
            .return_ok(Some(Customer::new("customer_1", "Test", "test@example.com")));
        mock.expect_find_many(vec![CustomerId::from("customer_9")])
            .return_ok(vec![]);

        let client = mock.client();
        let id = client
            .create(CustomerCreate {
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
            })
            .await
            .unwrap();
        let fetched = client.get(id).await.unwrap();
        assert_eq!(fetched.unwrap().email, "test@example.com");

        let found = client
            .find_many(vec![CustomerId::from("customer_9")])
            .await
            .unwrap();
        assert!(found.is_empty());

        mock.verify();
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(CustomerId::from("C1"))
            .return_err(FrameworkError::ActorClosed);

        let result = mock.client().get(CustomerId::from("C1")).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    }

    #[tokio::test]
    async fn test_unexpected_request_drops_responder() {
        let mock = MockClient::<Customer>::new();

        let result = mock.client().get(CustomerId::from("C1")).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
