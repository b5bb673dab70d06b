//! Entity trait implementation for the Order domain type.
//!
//! The Order actor is plain storage: validation happens before an [`OrderCreate`] is ever
//! sent, in [`CreateOrderService`](crate::services::CreateOrderService).

use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderAction, OrderCreate, OrderId, OrderUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.customer, params.products))
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
