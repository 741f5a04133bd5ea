use std::sync::Arc;

use crate::api::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::ClientResult;
use crate::http::HttpPipeline;

/// `POST /auth/*` endpoints. Both are public; the pipeline simply sends them
/// without credentials while signed out.
#[derive(Clone)]
pub struct AuthApi {
    http: Arc<HttpPipeline>,
}

impl AuthApi {
    pub fn new(http: Arc<HttpPipeline>) -> Self {
        Self { http }
    }

    /// 401 on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.http.post_json("/auth/login", &body).await
    }

    /// 409 on duplicate email.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<RegisterResponse> {
        let body = RegisterRequest {
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.http.post_json("/auth/register", &body).await
    }
}
