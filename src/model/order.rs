/// Represents a placed order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
/// Orders are written once and never change: [`OrderUpdate`] and [`OrderAction`] have
/// no variants.
use crate::model::{Customer, CustomerId, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(format!("order_{}", id))
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One priced line of a persisted order.
///
/// `price` is the unit price copied from the catalog when the order was created; later
/// catalog changes do not reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    /// Lines in the same order as the request they came from.
    pub products: Vec<OrderLineRecord>,
}

impl Order {
    pub fn new(id: OrderId, customer: Customer, products: Vec<OrderLineRecord>) -> Self {
        Self {
            id,
            customer,
            products,
        }
    }

    /// Sum of `quantity * price` over all lines.
    pub fn total(&self) -> f64 {
        self.products
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }
}

/// Payload for persisting a new order. The store allocates the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer: Customer,
    pub products: Vec<OrderLineRecord>,
}

#[derive(Debug, Clone)]
pub enum OrderUpdate {}

#[derive(Debug, Clone)]
pub enum OrderAction {}

// =============================================================================
// Inbound request
// =============================================================================

/// One requested product and how many units of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub id: ProductId,
    pub quantity: u32,
}

impl OrderLineRequest {
    pub fn new(id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// The input of order creation:
/// `{ "customer_id": "...", "products": [{ "id": "...", "quantity": n }] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<OrderLineRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_from_wire_shape() {
        let json = r#"{
            "customer_id": "C1",
            "products": [
                { "id": "P1", "quantity": 3 },
                { "id": "P2", "quantity": 1 }
            ]
        }"#;

        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.customer_id, CustomerId::from("C1"));
        assert_eq!(
            request.products,
            vec![OrderLineRequest::new("P1", 3), OrderLineRequest::new("P2", 1)]
        );
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let json = r#"{ "customer_id": "C1", "products": [{ "id": "P1", "quantity": -1 }] }"#;
        assert!(serde_json::from_str::<CreateOrderRequest>(json).is_err());
    }

    #[test]
    fn test_order_serializes_ids_as_plain_strings() {
        let order = Order::new(
            OrderId::from(7),
            Customer::new("C1", "Alice", "alice@example.com"),
            vec![OrderLineRecord {
                product_id: ProductId::from("P1"),
                quantity: 3,
                price: 10.0,
            }],
        );

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["id"], "order_7");
        assert_eq!(value["customer"]["id"], "C1");
        assert_eq!(value["products"][0]["product_id"], "P1");
        assert_eq!(value["products"][0]["price"], 10.0);
    }

    #[test]
    fn test_total() {
        let customer = Customer::new("C1", "Alice", "alice@example.com");
        let order = Order::new(
            OrderId::from(1),
            customer,
            vec![
                OrderLineRecord {
                    product_id: ProductId::from("P1"),
                    quantity: 3,
                    price: 10.0,
                },
                OrderLineRecord {
                    product_id: ProductId::from("P2"),
                    quantity: 2,
                    price: 2.5,
                },
            ],
        );
        assert_eq!(order.total(), 35.0);
    }
}
