use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use tracing::warn;

use crate::error::ClientResult;
use crate::http::{Next, RequestHook};
use crate::session::SessionStore;

/// Where the client sends the user after an involuntary sign-out.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Attaches the current bearer token to every outgoing request and reacts to
/// 401 responses by clearing the session and redirecting to login.
///
/// This is the only path that clears the session store involuntarily. The
/// original failure still reaches the caller so its own error UI can update.
/// No retry, no token refresh.
pub struct AuthInterceptor {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl AuthInterceptor {
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

#[async_trait]
impl RequestHook for AuthInterceptor {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> ClientResult<Response> {
        // Unauthenticated requests go out unmodified; several endpoints are public.
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    request.headers_mut().insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    warn!("bearer token is not a valid header value; sending unauthenticated");
                }
            }
        }

        let response = next.run(request).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("request rejected with 401; clearing session and redirecting to login");
            self.session.clear();
            self.navigator.redirect_to_login();
        }
        Ok(response)
    }
}
