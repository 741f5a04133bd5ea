pub mod auth;

pub use auth::{AuthInterceptor, Navigator};

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};

/// One stage of the outgoing request pipeline: `(request, next) -> response`.
///
/// Every call the client issues passes through the full hook chain, so
/// cross-cutting behavior (credential attachment, 401 handling) lives in one
/// composable unit instead of per-call logic.
#[async_trait]
pub trait RequestHook: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> ClientResult<Response>;
}

/// Cursor over the remaining hooks; the empty tail executes the request.
pub struct Next<'a> {
    client: &'a Client,
    hooks: &'a [Arc<dyn RequestHook>],
}

impl<'a> Next<'a> {
    pub async fn run(self, request: Request) -> ClientResult<Response> {
        match self.hooks.split_first() {
            Some((hook, rest)) => {
                let next = Next {
                    client: self.client,
                    hooks: rest,
                };
                hook.handle(request, next).await
            }
            None => self
                .client
                .execute(request)
                .await
                .map_err(ClientError::from),
        }
    }
}

/// HTTP door shared by the stores and API modules: a `reqwest` client, the
/// backend base URL, and the hook chain applied to every request.
pub struct HttpPipeline {
    client: Client,
    base_url: String,
    hooks: Vec<Arc<dyn RequestHook>>,
}

impl HttpPipeline {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn RequestHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn execute(&self, request: Request) -> ClientResult<Response> {
        let next = Next {
            client: &self.client,
            hooks: &self.hooks,
        };
        next.run(request).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.client.get(self.url(path)).build()?;
        self.send_expect_json(request).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.get(self.url(path)).query(query).build()?;
        self.send_expect_json(request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body).build()?;
        self.send_expect_json(request).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body).build()?;
        self.send_expect_json(request).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.patch(self.url(path)).json(body).build()?;
        self.send_expect_json(request).await
    }

    /// DELETE where the endpoint returns no body.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.client.delete(self.url(path)).build()?;
        let response = self.execute(request).await?;
        check_status(response).await?;
        Ok(())
    }

    async fn send_expect_json<T: DeserializeOwned>(&self, request: Request) -> ClientResult<T> {
        let response = self.execute(request).await?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}

async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ClientError::from_status(status, message))
}
