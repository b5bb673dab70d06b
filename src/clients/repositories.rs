//! # Repository Contracts
//!
//! The three capabilities order creation depends on. The actor clients in this module
//! implement them; any other storage layer can too, and
//! [`CreateOrderService`](crate::services::CreateOrderService) is generic over them.
//! `Arc<T>` forwards to `T`, so one store can back several services.

use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerId, Order, OrderCreate, OrderLineRequest, Product, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to customers.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    /// `Ok(None)` when no customer has this id.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError>;
}

/// Read access to the catalog plus stock decrements.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns the products that exist among `ids`. Unknown ids are omitted, not errors.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError>;

    /// Decrements each line's product stock by the line's quantity.
    ///
    /// Lines are applied one after another; a failure stops at that line and earlier
    /// decrements stay applied.
    async fn update_quantity(&self, lines: &[OrderLineRequest]) -> Result<(), ProductError>;
}

/// Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, allocating its id, and returns the stored value.
    async fn create(&self, order: OrderCreate) -> Result<Order, OrderError>;
}

#[async_trait]
impl<T: CustomerLookup + ?Sized> CustomerLookup for Arc<T> {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        (**self).find_all_by_id(ids).await
    }

    async fn update_quantity(&self, lines: &[OrderLineRequest]) -> Result<(), ProductError> {
        (**self).update_quantity(lines).await
    }
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn create(&self, order: OrderCreate) -> Result<Order, OrderError> {
        (**self).create(order).await
    }
}
