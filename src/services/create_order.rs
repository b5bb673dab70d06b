//! # Order Creation
//!
//! Validates a [`CreateOrderRequest`] against the customer and product stores, stores the
//! priced order, then takes the ordered units out of stock.
//!
//! The store and the stock decrement are two separate writes. If the decrement fails the
//! order stays stored and the error is returned; nothing is rolled back. Two concurrent
//! requests for the same product can both pass the stock check before either decrements.

use crate::clients::{CustomerLookup, OrderStore, ProductCatalog};
use crate::model::{
    CreateOrderRequest, Order, OrderCreate, OrderLineRecord, OrderLineRequest, Product, ProductId,
};
use crate::order_actor::OrderError;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

/// Places orders on top of three injected repositories.
pub struct CreateOrderService<O, P, C> {
    orders: O,
    products: P,
    customers: C,
}

impl<O, P, C> CreateOrderService<O, P, C>
where
    O: OrderStore,
    P: ProductCatalog,
    C: CustomerLookup,
{
    pub fn new(orders: O, products: P, customers: C) -> Self {
        Self {
            orders,
            products,
            customers,
        }
    }

    /// Creates an order.
    ///
    /// # Errors
    /// - [`OrderError::CustomerNotFound`] if the customer id does not resolve.
    /// - [`OrderError::ProductNotFound`] if any requested product id does not resolve, or
    ///   the same id is requested on more than one line.
    /// - [`OrderError::InsufficientStock`] if a line asks for more units than are in stock.
    ///
    /// None of these write anything. Failures of the stores themselves are passed through.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id, lines = request.products.len()))]
    pub async fn execute(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        debug!(?request, "create_order called");

        let customer = self
            .customers
            .find_by_id(&request.customer_id)
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(request.customer_id.clone()))?;

        let ids = distinct_ids(&request.products);
        let products = self.products.find_all_by_id(&ids).await?;
        if products.len() != request.products.len() {
            warn!(
                requested = request.products.len(),
                found = products.len(),
                "Product lookup came back short"
            );
            return Err(OrderError::ProductNotFound);
        }

        let lines = price_lines(&request.products, &products)?;

        let order = self
            .orders
            .create(OrderCreate {
                customer,
                products: lines,
            })
            .await?;
        info!(order_id = %order.id, "Order stored");

        if let Err(e) = self.products.update_quantity(&request.products).await {
            error!(order_id = %order.id, error = %e, "Stock decrement failed after order was stored");
            return Err(e.into());
        }

        info!(order_id = %order.id, "Order placed");
        Ok(order)
    }
}

/// Requested ids with repeats removed, first occurrence wins.
fn distinct_ids(lines: &[OrderLineRequest]) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for line in lines {
        if seen.insert(&line.id) {
            ids.push(line.id.clone());
        }
    }
    ids
}

/// Checks each line against the fetched catalog entry and snapshots its unit price.
fn price_lines(
    requested: &[OrderLineRequest],
    products: &[Product],
) -> Result<Vec<OrderLineRecord>, OrderError> {
    requested
        .iter()
        .map(|line| {
            let product = products
                .iter()
                .find(|p| p.id == line.id)
                .ok_or(OrderError::ProductNotFound)?;

            if line.quantity > product.quantity {
                return Err(OrderError::InsufficientStock {
                    product: product.name.clone(),
                    requested: line.quantity,
                    available: product.quantity,
                });
            }

            Ok(OrderLineRecord {
                product_id: product.id.clone(),
                quantity: line.quantity,
                price: product.price,
            })
        })
        .collect()
}
