use std::sync::Arc;

use crate::api::types::{Paged, ProductDetail, ProductQuery, ProductSummary, ProductUpsert};
use crate::error::ClientResult;
use crate::http::HttpPipeline;

/// `/product` endpoints: public paged listing and detail, admin-only CRUD.
/// Deletes are soft server-side.
#[derive(Clone)]
pub struct ProductsApi {
    http: Arc<HttpPipeline>,
}

impl ProductsApi {
    pub fn new(http: Arc<HttpPipeline>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ProductQuery) -> ClientResult<Paged<ProductSummary>> {
        self.http.get_json_with_query("/product", query).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<ProductDetail> {
        self.http.get_json(&format!("/product/{id}")).await
    }

    pub async fn create(&self, product: &ProductUpsert) -> ClientResult<ProductDetail> {
        self.http.post_json("/product", product).await
    }

    pub async fn update(&self, id: &str, product: &ProductUpsert) -> ClientResult<ProductDetail> {
        self.http.put_json(&format!("/product/{id}"), product).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/product/{id}")).await
    }
}
