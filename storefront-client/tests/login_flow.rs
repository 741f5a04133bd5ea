mod support;

use httpmock::prelude::*;
use serde_json::json;

use storefront_client::{ClientError, SessionStore, ROUTE_ADMIN, ROUTE_CATALOG};
use support::{bearer_token, test_client};

#[tokio::test]
async fn login_populates_session_and_persists_it() {
    let server = MockServer::start();
    let token = bearer_token(&json!({ "role": ["Admin", "User"] }));
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .json_body(json!({"email": "u@x.com", "password": "P@ssw0rd"}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "token": token,
                "expiresAt": "2030-01-01T00:00:00Z",
                "userId": "user-1",
                "email": "u@x.com"
            }));
    });

    let harness = test_client(&server);
    let response = harness
        .client
        .login("u@x.com", "P@ssw0rd")
        .await
        .expect("login succeeds");
    login.assert();

    assert_eq!(response.user_id, "user-1");
    let session = harness.client.session();
    assert!(session.is_authenticated());
    assert!(session.has_role("Admin"));
    assert!(session.has_role("User"));
    assert!(!session.has_role("Manager"));
    assert_eq!(harness.client.landing_route(), ROUTE_ADMIN);

    // A fresh store over the same storage reproduces the identical session.
    let rehydrated = SessionStore::new(harness.storage.clone());
    assert_eq!(rehydrated.current(), session.current());
}

#[tokio::test]
async fn login_with_undecodable_token_still_signs_in() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "token": "not-a-jwt",
                "expiresAt": "2030-01-01T00:00:00Z",
                "userId": "user-1",
                "email": "u@x.com"
            }));
    });

    let harness = test_client(&server);
    harness
        .client
        .login("u@x.com", "P@ssw0rd")
        .await
        .expect("login succeeds");

    let session = harness.client.session();
    assert!(session.is_authenticated());
    assert!(session.current().roles.is_empty());
    assert_eq!(harness.client.landing_route(), ROUTE_CATALOG);
}

#[tokio::test]
async fn bad_credentials_surface_unauthorized_without_session_change() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(401);
    });

    let harness = test_client(&server);
    let err = harness
        .client
        .login("u@x.com", "wrong")
        .await
        .expect_err("login fails");
    assert!(err.is_unauthorized());
    assert!(!harness.client.session().is_authenticated());
}

#[tokio::test]
async fn duplicate_registration_maps_to_conflict() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/auth/register")
            .json_body(json!({"fullName": "New User", "email": "u@x.com", "password": "P@ssw0rd"}));
        then.status(409).body("email already registered");
    });

    let harness = test_client(&server);
    let err = harness
        .client
        .register("New User", "u@x.com", "P@ssw0rd")
        .await
        .expect_err("register fails");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "email already registered");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn logout_clears_session_storage_and_cart() {
    let server = MockServer::start();
    let token = bearer_token(&json!({ "role": "User" }));
    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "token": token,
                "expiresAt": "2030-01-01T00:00:00Z",
                "userId": "user-1",
                "email": "u@x.com"
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/cart");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "items": [
                    {"id": "l1", "productId": "p1", "quantity": 2, "unitPrice": 10.0, "lineTotal": 20.0}
                ],
                "totalAmount": 20.0
            }));
    });

    let harness = test_client(&server);
    harness
        .client
        .login("u@x.com", "P@ssw0rd")
        .await
        .expect("login succeeds");
    harness.client.cart().fetch().await.expect("cart fetch");
    assert_eq!(harness.client.cart().item_count(), 2);

    harness.client.logout();
    assert!(!harness.client.session().is_authenticated());
    assert!(harness.storage.is_empty());
    assert!(harness.client.cart().current().is_none());
    assert_eq!(harness.client.cart().item_count(), 0);
    assert_eq!(harness.navigator.redirects(), 0);
}
