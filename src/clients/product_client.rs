//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog and stock methods.

use crate::clients::repositories::ProductCatalog;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{OrderLineRequest, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Changes price and/or stock. Orders placed earlier keep the price they were placed at.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected_result("CheckStock", other)),
        }
    }

    /// Removes `quantity` units from stock.
    ///
    /// Returns the remaining level, or `InsufficientStock` if the product holds fewer units.
    #[instrument(skip(self))]
    pub async fn decrement_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Decrementing {} units of product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::DecrementStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::DecrementStock(remaining) => Ok(remaining),
            other => Err(unexpected_result("DecrementStock", other)),
        }
    }
}

fn unexpected_result(action: &str, result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!(
        "{} answered with mismatched result {:?}",
        action, result
    ))
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .into_entity_error::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

#[async_trait]
impl ProductCatalog for ProductClient {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        self.inner
            .find_many(ids.to_vec())
            .await
            .map_err(Self::map_error)
    }

    async fn update_quantity(&self, lines: &[OrderLineRequest]) -> Result<(), ProductError> {
        for line in lines {
            self.decrement_stock(line.id.clone(), line.quantity).await?;
        }
        Ok(())
    }
}
