use std::sync::Arc;

use crate::api::types::{AddCartItemRequest, Cart, UpdateCartItemRequest};
use crate::error::ClientResult;
use crate::http::HttpPipeline;

/// `/cart` endpoints. Mutations return the fresh server snapshot, except the
/// line delete, which returns no body.
#[derive(Clone)]
pub struct CartApi {
    http: Arc<HttpPipeline>,
}

impl CartApi {
    pub fn new(http: Arc<HttpPipeline>) -> Self {
        Self { http }
    }

    /// The server auto-creates an empty cart if none exists.
    pub async fn fetch(&self) -> ClientResult<Cart> {
        self.http.get_json("/cart").await
    }

    pub async fn add_item(&self, product_id: &str, quantity: u32) -> ClientResult<Cart> {
        let body = AddCartItemRequest {
            product_id: product_id.to_owned(),
            quantity,
        };
        self.http.post_json("/cart/items", &body).await
    }

    pub async fn update_item(&self, line_id: &str, quantity: u32) -> ClientResult<Cart> {
        let body = UpdateCartItemRequest { quantity };
        self.http
            .put_json(&format!("/cart/items/{line_id}"), &body)
            .await
    }

    pub async fn remove_item(&self, line_id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/cart/items/{line_id}")).await
    }

    pub async fn clear(&self) -> ClientResult<()> {
        self.http.delete("/cart/clear").await
    }
}
