use std::sync::Arc;

use crate::api::types::{Category, CategoryUpsert};
use crate::error::ClientResult;
use crate::http::HttpPipeline;

/// `/category` endpoints: public listing, admin-only CRUD.
#[derive(Clone)]
pub struct CategoriesApi {
    http: Arc<HttpPipeline>,
}

impl CategoriesApi {
    pub fn new(http: Arc<HttpPipeline>) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        self.http.get_json("/category").await
    }

    pub async fn create(&self, category: &CategoryUpsert) -> ClientResult<Category> {
        self.http.post_json("/category", category).await
    }

    pub async fn update(&self, id: &str, category: &CategoryUpsert) -> ClientResult<Category> {
        self.http.put_json(&format!("/category/{id}"), category).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/category/{id}")).await
    }
}
