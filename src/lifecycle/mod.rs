//! Process-level concerns: wiring the actors, configuration, and log setup.

pub mod config;
pub mod order_system;
pub mod tracing;

pub use config::{ConfigError, SystemConfig};
pub use order_system::{ActorOrderService, OrderSystem};
pub use self::tracing::setup_tracing;
