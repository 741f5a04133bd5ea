use std::sync::Arc;

use crate::api::types::{CreateOrderRequest, OrderDetail, OrderStatus, PaymentMethod, UpdateOrderStatusRequest};
use crate::error::ClientResult;
use crate::http::HttpPipeline;

/// `/order` endpoints. Creating an order clears the server-side cart as a
/// side effect; the facade resets the local cart store afterwards.
#[derive(Clone)]
pub struct OrdersApi {
    http: Arc<HttpPipeline>,
}

impl OrdersApi {
    pub fn new(http: Arc<HttpPipeline>) -> Self {
        Self { http }
    }

    pub async fn create(
        &self,
        shipping_address: &str,
        payment_method: PaymentMethod,
    ) -> ClientResult<OrderDetail> {
        let body = CreateOrderRequest {
            shipping_address: shipping_address.to_owned(),
            payment_method,
        };
        self.http.post_json("/order", &body).await
    }

    /// Orders of the signed-in user.
    pub async fn list(&self) -> ClientResult<Vec<OrderDetail>> {
        self.http.get_json("/order").await
    }

    pub async fn get(&self, id: &str) -> ClientResult<OrderDetail> {
        self.http.get_json(&format!("/order/{id}")).await
    }

    /// Admin only.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> ClientResult<OrderDetail> {
        let body = UpdateOrderStatusRequest { status };
        self.http
            .patch_json(&format!("/order/{id}/status"), &body)
            .await
    }

    /// Admin only.
    pub async fn list_all(&self) -> ClientResult<Vec<OrderDetail>> {
        self.http.get_json("/order/all").await
    }
}
