//! Demo run: seeds one customer and one product, places an order through
//! [`CreateOrderService`](order_service::services::CreateOrderService) and prints it as JSON.
//!
//! Set `ORDER_SERVICE_CONFIG` to a YAML file to override the defaults.

use order_service::lifecycle::{setup_tracing, OrderSystem, SystemConfig};
use order_service::model::{CreateOrderRequest, CustomerCreate, OrderLineRequest, ProductCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = SystemConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!("Starting order service demo");

    let system = OrderSystem::new(&config);

    let span = tracing::info_span!("seeding");
    let (customer_id, product_id) = async {
        let customer_id = system
            .customer_client
            .create_customer(CustomerCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;

        let product_id = system
            .product_client
            .create_product(ProductCreate {
                name: "Widget".to_string(),
                price: 10.0,
                quantity: 5,
            })
            .await
            .map_err(|e| e.to_string())?;

        Ok::<_, String>((customer_id, product_id))
    }
    .instrument(span)
    .await?;

    info!(customer_id = %customer_id, product_id = %product_id, "Seed data created");

    let request = CreateOrderRequest {
        customer_id,
        products: vec![OrderLineRequest::new(product_id.clone(), 3)],
    };

    let span = tracing::info_span!("order_processing");
    let result = system
        .create_order_service()
        .execute(request)
        .instrument(span)
        .await;

    match result {
        Ok(order) => {
            let json = serde_json::to_string_pretty(&order).map_err(|e| e.to_string())?;
            println!("{}", json);

            let remaining = system
                .product_client
                .check_stock(product_id)
                .await
                .map_err(|e| e.to_string())?;
            info!(order_id = %order.id, remaining, "Order processed successfully");
        }
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
