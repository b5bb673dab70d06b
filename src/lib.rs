#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Order Service
//!
//! > **Order creation over resource-oriented actors.**
//!
//! A customer asks for some products. The service checks that the customer and every
//! product exist and that stock covers each line. It then stores the order with the unit
//! prices of that moment and takes the ordered units out of stock.
//!
//! ## 🏗️ Design
//!
//! Customers, products and orders each live in their own actor. An actor owns its store and
//! handles one message at a time, so the stores need no locks. The actors never call each
//! other. Coordination lives in [`services::CreateOrderService`], which only sees three
//! small repository traits:
//!
//! - [`CustomerLookup`](clients::CustomerLookup): `find_by_id`
//! - [`ProductCatalog`](clients::ProductCatalog): `find_all_by_id`, `update_quantity`
//! - [`OrderStore`](clients::OrderStore): `create`
//!
//! The actor clients implement them. Tests can swap in in-memory fakes or
//! [`MockClient`](framework::mock::MockClient)-backed clients.
//!
//! ### What is *not* guaranteed
//!
//! Storing the order and decrementing stock are separate writes. A failed decrement leaves
//! the order stored and returns the error. Checking stock and decrementing it are separate
//! round trips too, so two concurrent orders for the last units can both succeed
//! validation. The product actor refuses to go below zero, so the second decrement
//! fails instead of over-selling.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>`, its client, the `ActorEntity` trait and the test mocks.
//!
//! ### 2. The Data ([`model`])
//! `Customer`, `Product`, `Order`, the typed ids, and the inbound `CreateOrderRequest`.
//!
//! ### 3. The Actors ([`customer_actor`], [`product_actor`], [`order_actor`])
//! `ActorEntity` implementations, per-resource errors and product stock actions.
//!
//! ### 4. The Interface ([`clients`])
//! Typed clients plus the repository traits they implement.
//!
//! ### 5. The Workflow ([`services`])
//! [`CreateOrderService`](services::CreateOrderService).
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! [`OrderSystem`](lifecycle::OrderSystem) starts and stops the actors;
//! [`SystemConfig`](lifecycle::SystemConfig) and
//! [`setup_tracing`](lifecycle::setup_tracing) cover configuration and logs.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod customer_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod services;
