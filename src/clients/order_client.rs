//! # Order Client
//!
//! High-level API for the `Order` actor. Validation is not done here; see
//! [`CreateOrderService`](crate::services::CreateOrderService).

use crate::clients::repositories::OrderStore;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores the order and reads it back, so the caller gets the value with its new id.
    #[instrument(skip(self, params), fields(customer_id = %params.customer.id, lines = params.products.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");

        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order stored");

        self.get(id.clone()).await?.ok_or_else(|| {
            OrderError::ActorCommunicationError(format!("order {} missing after create", id))
        })
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<OrderError>()
            .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string()))
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    async fn create(&self, order: OrderCreate) -> Result<Order, OrderError> {
        self.create_order(order).await
    }
}
