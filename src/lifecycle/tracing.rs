//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. `RUST_LOG` takes
//! precedence; otherwise the configured default filter applies.
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Request payloads and every actor message
//! RUST_LOG=debug cargo run
//!
//! # Only the service layer in detail
//! RUST_LOG=order_service::services=debug,info cargo run
//! ```
//!
//! Entry points log their full payload once at `debug` (`debug!(?request, ...)`), after
//! which events stay short. A successful order at `info` looks like:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO execute{customer_id=customer_1 lines=1}:create_order{customer_id=customer_1 lines=1}: Order stored order_id=order_1
//! INFO execute{customer_id=customer_1 lines=1}: Order stored order_id=order_1
//! INFO Action ok entity_type="Product" id=product_1
//! INFO execute{customer_id=customer_1 lines=1}: Order placed order_id=order_1
//! ```
//!
//! Actor events are emitted from the actor's own task, outside the caller's span. Match
//! them to a request by `id`.
//!
//! A decrement that fails after the order was stored is logged at `error` with the
//! order id, so the stored order can be found and reconciled.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
