//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient), and the
//! repository traits they implement.

pub mod customer_client;
pub mod order_client;
pub mod product_client;
pub mod repositories;

pub use customer_client::*;
pub use order_client::*;
pub use product_client::*;
pub use repositories::*;
