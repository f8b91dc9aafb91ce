//! Integration tests for Mr. Daebak.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mr-daebak-integration-tests
//! ```
//!
//! Nothing external is needed: the router runs in-process over a
//! [`MemoryStore`] and requests go through `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `ordering_flow` - Service-level flows across identity, draft, checkout and ledger
//! - `http_api` - The JSON API end to end, carrying the session cookie

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use mr_daebak_storefront::catalog::MenuCatalog;
use mr_daebak_storefront::config::StorefrontConfig;
use mr_daebak_storefront::db::{KeyValueStore, MemoryStore};
use mr_daebak_storefront::routes;
use mr_daebak_storefront::state::AppState;

/// Configuration with every variable unset.
///
/// # Panics
///
/// Panics if the defaults stop parsing.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|_| None).expect("default config")
}

/// Application state over a fresh in-memory store.
#[must_use]
pub fn test_state(store: &MemoryStore) -> AppState {
    let store: Arc<dyn KeyValueStore> = Arc::new(store.clone());
    AppState::new(test_config(), MenuCatalog::seeded(), store)
}

/// A browser-like client: one router, one session cookie.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client over an app sharing `store`.
    ///
    /// Each client's app holds its own session store, so two clients never
    /// share a session even when they share the ledger.
    #[must_use]
    pub fn new(store: &MemoryStore) -> Self {
        Self {
            router: routes::app(test_state(store)),
            cookie: None,
        }
    }

    /// Forget the session cookie, as a new browser would.
    pub fn drop_cookie(&mut self) {
        self.cookie = None;
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn put(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send one request and return the status and the JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            self.store_cookie(set_cookie);
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let value = pair.split_once('=').map_or("", |(_, v)| v);
        self.cookie = if value.is_empty() {
            None
        } else {
            Some(pair.to_owned())
        };
    }
}
