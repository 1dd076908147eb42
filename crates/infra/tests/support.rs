//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use storefront_core::{CredentialStore, RefreshFailure};
use storefront_domain::{Config, StoredSession, TokenPair};
use storefront_infra::{ChannelLogoutSignal, MemoryCredentialStore, StorefrontClient};
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::MockServer;

pub const PRODUCTS: &str = "/api/tiktak/products";
pub const BASKET: &str = "/api/tiktak/basket";
pub const CHECKOUT: &str = "/api/tiktak/orders/checkout";
pub const LOGIN: &str = "/api/tiktak/auth/login";
pub const REFRESH: &str = "/api/tiktak/auth/refresh";

/// Client under test plus the handles a test inspects afterwards.
pub struct TestClient {
    pub client: StorefrontClient,
    pub store: Arc<MemoryCredentialStore>,
    pub logouts: UnboundedReceiver<RefreshFailure>,
}

impl TestClient {
    /// Forced logouts published since the last drain.
    pub fn drain_logouts(&mut self) -> Vec<RefreshFailure> {
        let mut seen = Vec::new();
        while let Ok(reason) = self.logouts.try_recv() {
            seen.push(reason);
        }
        seen
    }
}

pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.timeout_ms = 2_000;
    config
}

/// Client signed in with the given token pair.
pub fn signed_in(server: &MockServer, access: &str, refresh: &str) -> TestClient {
    let tokens = TokenPair::new(access, refresh).expect("non-empty test tokens");
    let store = Arc::new(MemoryCredentialStore::with_session(StoredSession { tokens, user: None }));
    build(server, store)
}

pub fn signed_out(server: &MockServer) -> TestClient {
    build(server, Arc::new(MemoryCredentialStore::new()))
}

fn build(server: &MockServer, store: Arc<MemoryCredentialStore>) -> TestClient {
    let (signal, logouts) = ChannelLogoutSignal::channel();
    let client = StorefrontClient::builder()
        .config(config_for(server))
        .credentials(store.clone() as Arc<dyn CredentialStore>)
        .logout_signal(Arc::new(signal))
        .build()
        .expect("client should build");
    TestClient { client, store, logouts }
}

pub fn product_page(name: &str) -> Value {
    json!({
        "data": [{ "id": 1, "name": name, "price": 2.5, "category_id": 4 }],
        "total": 1,
        "page": 1,
        "limit": 20
    })
}

pub fn basket(quantity: u32) -> Value {
    json!({
        "data": [{ "id": 10, "product_id": 1, "quantity": quantity }],
        "total_items": quantity,
        "total_price": 2.5 * f64::from(quantity)
    })
}
