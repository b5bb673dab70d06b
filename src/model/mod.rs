//! Pure data structures implementing the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! plus the request shapes accepted by the order service.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
