use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::lifecycle::config::SystemConfig;
use crate::services::CreateOrderService;
use tracing::{error, info};

/// [`CreateOrderService`] backed by the in-process actors.
pub type ActorOrderService = CreateOrderService<OrderClient, ProductClient, CustomerClient>;

/// Starts, wires and stops the actors behind order creation.
///
/// # Architecture
///
/// - **Customer Actor**: customers, read by order validation
/// - **Product Actor**: catalog and stock levels
/// - **Order Actor**: stored orders
///
/// None of the actors know about each other. [`CreateOrderService`] holds a clone of each
/// client and does the coordination.
///
/// # Example
///
/// ```rust
/// use order_service::lifecycle::{OrderSystem, SystemConfig};
/// use order_service::model::{CreateOrderRequest, CustomerCreate, OrderLineRequest, ProductCreate};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = OrderSystem::new(&SystemConfig::default());
///
///     let customer_id = system
///         .customer_client
///         .create_customer(CustomerCreate {
///             name: "Alice".into(),
///             email: "alice@example.com".into(),
///         })
///         .await?;
///     let product_id = system
///         .product_client
///         .create_product(ProductCreate {
///             name: "Widget".into(),
///             price: 10.0,
///             quantity: 5,
///         })
///         .await?;
///
///     let order = system
///         .create_order_service()
///         .execute(CreateOrderRequest {
///             customer_id,
///             products: vec![OrderLineRequest::new(product_id, 3)],
///         })
///         .await?;
///     assert_eq!(order.products.len(), 1);
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns the three actors. Must be called inside a Tokio runtime.
    pub fn new(config: &SystemConfig) -> Self {
        let (customer_actor, customer_client) = crate::customer_actor::new(config.channel_buffer);
        let (product_actor, product_client) = crate::product_actor::new(config.channel_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.channel_buffer);

        let customer_handle = tokio::spawn(customer_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!(channel_buffer = config.channel_buffer, "Order system started");

        Self {
            customer_client,
            product_client,
            order_client,
            handles: vec![customer_handle, product_handle, order_handle],
        }
    }

    /// A service over clones of this system's clients.
    ///
    /// Drop every service before [`shutdown`](Self::shutdown), or the actors keep running
    /// and shutdown waits for them.
    pub fn create_order_service(&self) -> ActorOrderService {
        CreateOrderService::new(
            self.order_client.clone(),
            self.product_client.clone(),
            self.customer_client.clone(),
        )
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the request channels; each actor then drains its queue
    /// and exits. Returns an error if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.customer_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
