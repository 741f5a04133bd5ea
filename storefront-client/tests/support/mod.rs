#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use httpmock::MockServer;

use storefront_client::{ClientConfig, MemoryStorage, Navigator, StorefrontClient};

/// Counts redirect-to-login triggers instead of navigating anywhere.
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            redirects: AtomicUsize::new(0),
        })
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Build an unsigned bearer token whose middle segment is `payload`.
pub fn bearer_token(payload: &serde_json::Value) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("header.{encoded}.signature")
}

pub struct TestClient {
    pub client: StorefrontClient,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn test_client(server: &MockServer) -> TestClient {
    let storage = Arc::new(MemoryStorage::new());
    let navigator = RecordingNavigator::new();
    let client = StorefrontClient::new(
        ClientConfig::new(server.base_url()),
        storage.clone(),
        navigator.clone(),
    )
    .expect("client builds");
    TestClient {
        client,
        storage,
        navigator,
    }
}
