//! Error types for order creation and the Order actor.

use crate::customer_actor::CustomerError;
use crate::model::CustomerId;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur while creating or storing an order.
///
/// The first three variants are the business outcomes of order validation. The rest
/// carry failures of the collaborators the order service talks to.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// No customer exists for the given id.
    #[error("Customer ID was not found: {0}")]
    CustomerNotFound(CustomerId),

    /// At least one requested product id did not resolve to a catalog entry.
    #[error("Some Product Id was not found")]
    ProductNotFound,

    /// A line asks for more units than the product has in stock.
    #[error("There are not enough items ({product}) in stock: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(#[from] ProductError),

    /// An error occurred while communicating with the order store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
