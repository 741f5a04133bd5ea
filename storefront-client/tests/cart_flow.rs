mod support;

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use storefront_client::ClientError;
use support::test_client;

fn cart_snapshot() -> serde_json::Value {
    json!({
        "items": [
            {"id": "l1", "productId": "p1", "quantity": 2, "unitPrice": 10.0, "lineTotal": 20.0}
        ],
        "totalAmount": 20.0
    })
}

#[tokio::test]
async fn fetch_replaces_store_value() {
    let server = MockServer::start();
    let fetch = server.mock(|when, then| {
        when.method(GET).path("/cart");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(cart_snapshot());
    });

    let harness = test_client(&server);
    let cart = harness.client.cart();
    assert!(cart.current().is_none());
    assert_eq!(cart.item_count(), 0);

    cart.fetch().await.expect("fetch succeeds");
    fetch.assert();

    let current = cart.current().expect("cart present");
    assert_eq!(current.items.len(), 1);
    assert_eq!(current.items[0].id, "l1");
    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn add_item_adopts_server_snapshot_exactly() {
    let server = MockServer::start();
    let add = server.mock(|when, then| {
        when.method(POST)
            .path("/cart/items")
            .json_body(json!({"productId": "p1", "quantity": 2}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(cart_snapshot());
    });

    let harness = test_client(&server);
    let cart = harness.client.cart();
    let returned = cart.add_item("p1", 2).await.expect("add succeeds");
    add.assert();

    // The published value is the server's snapshot, not a local increment.
    assert_eq!(cart.current().as_ref(), Some(&returned));
    assert_eq!(returned.items[0].product_id, "p1");
    assert!((returned.total_amount - 20.0).abs() < f64::EPSILON);
    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn failed_mutation_leaves_value_untouched() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/cart");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(cart_snapshot());
    });
    let add = server.mock(|when, then| {
        when.method(POST).path("/cart/items");
        then.status(500).body("boom");
    });

    let harness = test_client(&server);
    let cart = harness.client.cart();
    cart.fetch().await.expect("fetch succeeds");
    let before = cart.current();

    let err = cart.add_item("p2", 1).await.expect_err("add fails");
    add.assert();
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(cart.current(), before);
    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn update_item_replaces_snapshot() {
    let server = MockServer::start();
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/cart/items/l1")
            .json_body(json!({"quantity": 5}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "items": [
                    {"id": "l1", "productId": "p1", "quantity": 5, "unitPrice": 10.0, "lineTotal": 50.0}
                ],
                "totalAmount": 50.0
            }));
    });

    let harness = test_client(&server);
    let cart = harness.client.cart();
    cart.update_item("l1", 5).await.expect("update succeeds");
    update.assert();
    assert_eq!(cart.item_count(), 5);
    assert!(!cart.is_line_pending("l1"));
}

#[tokio::test]
async fn remove_item_refetches_the_cart() {
    let server = MockServer::start();
    let remove = server.mock(|when, then| {
        when.method(DELETE).path("/cart/items/l1");
        then.status(204);
    });
    let fetch = server.mock(|when, then| {
        when.method(GET).path("/cart");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"items": [], "totalAmount": 0.0}));
    });

    let harness = test_client(&server);
    let cart = harness.client.cart();
    let refreshed = cart.remove_item("l1").await.expect("remove succeeds");
    remove.assert();
    fetch.assert();
    assert!(refreshed.items.is_empty());
    assert_eq!(cart.item_count(), 0);
}

#[tokio::test]
async fn clear_sets_value_to_none_without_refetch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/cart");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(cart_snapshot());
    });
    let clear = server.mock(|when, then| {
        when.method(DELETE).path("/cart/clear");
        then.status(204);
    });

    let harness = test_client(&server);
    let cart = harness.client.cart();
    cart.fetch().await.expect("fetch succeeds");
    cart.clear().await.expect("clear succeeds");
    clear.assert();
    assert!(cart.current().is_none());
    assert_eq!(cart.item_count(), 0);
}

#[tokio::test]
async fn in_flight_line_mutation_is_tracked_per_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/cart/items/l1");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(cart_snapshot())
            .delay(Duration::from_millis(500));
    });

    let harness = test_client(&server);
    let cart = harness.client.cart().clone();
    let task = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.update_item("l1", 3).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(cart.is_line_pending("l1"));
    assert!(!cart.is_line_pending("l2"));

    task.await
        .expect("task joins")
        .expect("update succeeds");
    assert!(!cart.is_line_pending("l1"));
}
