use order_service::framework::ActorClient;
use order_service::lifecycle::{OrderSystem, SystemConfig};
use order_service::model::{
    CreateOrderRequest, CustomerCreate, CustomerId, OrderLineRecord, OrderLineRequest,
    ProductCreate, ProductId, ProductUpdate,
};
use order_service::order_actor::OrderError;
use order_service::product_actor::ProductError;

/// Starts the full system with one customer and a "Widget" at 10.0 with 5 in stock.
async fn seeded_system() -> (OrderSystem, CustomerId, ProductId) {
    let system = OrderSystem::new(&SystemConfig::default());

    let customer_id = system
        .customer_client
        .create_customer(CustomerCreate {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .expect("Failed to create customer");

    let product_id = system
        .product_client
        .create_product(ProductCreate {
            name: "Widget".to_string(),
            price: 10.0,
            quantity: 5,
        })
        .await
        .expect("Failed to create product");

    (system, customer_id, product_id)
}

fn request(customer_id: &CustomerId, lines: &[(&ProductId, u32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: customer_id.clone(),
        products: lines
            .iter()
            .map(|(id, qty)| OrderLineRequest::new((*id).clone(), *qty))
            .collect(),
    }
}

/// Full end-to-end run with all real actors.
#[tokio::test]
async fn test_order_is_stored_and_stock_decremented() {
    let (system, customer_id, product_id) = seeded_system().await;

    let order = system
        .create_order_service()
        .execute(request(&customer_id, &[(&product_id, 3)]))
        .await
        .expect("Failed to create order");

    assert_eq!(order.customer.id, customer_id);
    assert_eq!(
        order.products,
        vec![OrderLineRecord {
            product_id: product_id.clone(),
            quantity: 3,
            price: 10.0,
        }]
    );

    let stored = system
        .order_client
        .get(order.id.clone())
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored, order);

    let stock = system.product_client.check_stock(product_id).await.unwrap();
    assert_eq!(stock, 2);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_insufficient_stock_leaves_everything_untouched() {
    let (system, customer_id, product_id) = seeded_system().await;

    let err = system
        .create_order_service()
        .execute(request(&customer_id, &[(&product_id, 6)]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::InsufficientStock {
            product: "Widget".to_string(),
            requested: 6,
            available: 5,
        }
    );
    assert!(err.to_string().contains("Widget"));

    let stock = system.product_client.check_stock(product_id).await.unwrap();
    assert_eq!(stock, 5);

    // Nothing was stored, so the first id is still free.
    let first = system.order_client.get("order_1".into()).await.unwrap();
    assert!(first.is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product() {
    let (system, customer_id, product_id) = seeded_system().await;
    let missing = ProductId::from("P2");

    let err = system
        .create_order_service()
        .execute(request(&customer_id, &[(&product_id, 1), (&missing, 1)]))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::ProductNotFound);
    assert_eq!(
        system.product_client.check_stock(product_id).await.unwrap(),
        5
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_customer() {
    let (system, _, product_id) = seeded_system().await;
    let stranger = CustomerId::from("C9");

    let err = system
        .create_order_service()
        .execute(request(&stranger, &[(&product_id, 1)]))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::CustomerNotFound(stranger));
    assert_eq!(
        system.product_client.check_stock(product_id).await.unwrap(),
        5
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_repeated_product_line_is_rejected() {
    let (system, customer_id, product_id) = seeded_system().await;

    let err = system
        .create_order_service()
        .execute(request(&customer_id, &[(&product_id, 1), (&product_id, 1)]))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::ProductNotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_price_is_snapshotted() {
    let (system, customer_id, product_id) = seeded_system().await;

    let order = system
        .create_order_service()
        .execute(request(&customer_id, &[(&product_id, 2)]))
        .await
        .unwrap();

    let repriced = system
        .product_client
        .update_product(
            product_id.clone(),
            ProductUpdate {
                price: Some(99.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(repriced.price, 99.0);

    let stored = system
        .order_client
        .get(order.id)
        .await
        .unwrap()
        .expect("Order not found");
    assert_eq!(stored.products[0].price, 10.0);
    assert_eq!(stored.total(), 20.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_multi_line_order() {
    let (system, customer_id, widget) = seeded_system().await;
    let gadget = system
        .product_client
        .create_product(ProductCreate {
            name: "Gadget".to_string(),
            price: 2.5,
            quantity: 10,
        })
        .await
        .unwrap();

    let order = system
        .create_order_service()
        .execute(request(&customer_id, &[(&gadget, 4), (&widget, 5)]))
        .await
        .unwrap();

    assert_eq!(order.products.len(), 2);
    assert_eq!(order.products[0].product_id, gadget);
    assert_eq!(order.products[1].product_id, widget);
    assert_eq!(order.total(), 60.0);

    assert_eq!(system.product_client.check_stock(gadget).await.unwrap(), 6);
    assert_eq!(system.product_client.check_stock(widget).await.unwrap(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_request_from_wire_json() {
    let (system, customer_id, product_id) = seeded_system().await;

    let json = format!(
        r#"{{ "customer_id": "{}", "products": [{{ "id": "{}", "quantity": 3 }}] }}"#,
        customer_id, product_id
    );
    let request: CreateOrderRequest = serde_json::from_str(&json).unwrap();

    let order = system.create_order_service().execute(request).await.unwrap();
    let value = serde_json::to_value(&order).unwrap();

    assert_eq!(value["products"][0]["product_id"], product_id.0.as_str());
    assert_eq!(value["products"][0]["quantity"], 3);
    assert_eq!(value["products"][0]["price"], 10.0);

    system.shutdown().await.unwrap();
}

/// Two orders for 3 of the 5 units race each other. Exactly one can win; the loser fails
/// either during validation or at the decrement after its order was stored.
#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let (system, customer_id, product_id) = seeded_system().await;

    let first = system.create_order_service();
    let second = system.create_order_service();
    let req = request(&customer_id, &[(&product_id, 3)]);

    let (a, b) = tokio::join!(first.execute(req.clone()), second.execute(req));
    drop((first, second));

    let outcomes = [a, b];
    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);

    for err in outcomes.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(
            err,
            OrderError::InsufficientStock { .. }
                | OrderError::Product(ProductError::InsufficientStock { .. })
        ));
    }

    assert_eq!(
        system.product_client.check_stock(product_id).await.unwrap(),
        2
    );

    system.shutdown().await.unwrap();
}
