//! Business workflows that span more than one actor.

pub mod create_order;

pub use create_order::CreateOrderService;
