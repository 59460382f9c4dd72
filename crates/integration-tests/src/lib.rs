//! Shared helpers for Boostline integration tests.
//!
//! Tests drive the real storefront and admin routers in-process via
//! `tower::ServiceExt::oneshot` against a fresh temp-dir store - no
//! network, no external services. The [`Client`] keeps a cookie jar so
//! device identity and sessions behave as they would in a browser.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use boostline_core::types::credential::hash_password;
use boostline_core::user::{User, UserRole};
use boostline_store::JsonStore;

/// A fresh pair of apps over one shared store.
pub struct TestStack {
    pub store: JsonStore,
    storefront: Router,
    admin: Router,
}

impl TestStack {
    /// Build both routers over a brand-new temp-dir store.
    pub async fn new() -> Self {
        let data_dir = std::env::temp_dir().join(format!("boostline-it-{}", uuid::Uuid::new_v4()));
        let store = JsonStore::open(&data_dir).await.unwrap();

        let storefront = storefront_router(&data_dir, store.clone());
        let admin = admin_router(&data_dir, store.clone());

        Self {
            store,
            storefront,
            admin,
        }
    }

    /// A browser-like client for the storefront.
    #[must_use]
    pub fn storefront_client(&self) -> Client {
        Client::new(self.storefront.clone())
    }

    /// A browser-like client for the admin panel.
    #[must_use]
    pub fn admin_client(&self) -> Client {
        Client::new(self.admin.clone())
    }

    /// Create an admin account directly in the store and return it with its
    /// password (the CLI path, minus the CLI).
    pub async fn create_admin(&self, email: &str, phone: &str, password: &str) -> User {
        self.store
            .users()
            .register(
                email.parse().unwrap(),
                phone.parse().unwrap(),
                hash_password(password).unwrap(),
                UserRole::Admin,
                Some("Test Admin".to_owned()),
            )
            .await
            .unwrap()
    }
}

fn storefront_router(data_dir: &Path, store: JsonStore) -> Router {
    use boostline_storefront::config::{StorefrontConfig, TipsConfig};
    use boostline_storefront::state::AppState;

    let config = StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        poll_interval: Duration::from_millis(50),
        tips: TipsConfig {
            api_key: None,
            model: "claude-haiku-4-5".to_string(),
        },
    };
    let state = AppState::new(config, store);

    Router::new()
        .merge(boostline_storefront::routes::routes())
        .layer(axum::middleware::from_fn(
            boostline_storefront::middleware::session::device_cookie,
        ))
        .with_state(state)
}

fn admin_router(data_dir: &Path, store: JsonStore) -> Router {
    use boostline_admin::config::AdminConfig;
    use boostline_admin::state::AppState;

    let config = AdminConfig {
        data_dir: data_dir.to_path_buf(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
    };
    let state = AppState::new(config, store);

    Router::new()
        .merge(boostline_admin::routes::routes())
        .with_state(state)
}

/// A minimal browser: one router, one cookie jar.
pub struct Client {
    router: Router,
    cookies: HashMap<String, String>,
}

impl Client {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            router,
            cookies: HashMap::new(),
        }
    }

    /// Perform a request, carrying and capturing cookies, and parse the
    /// body as JSON (`Value::Null` for empty bodies).
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.request_raw(method, path, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Perform a request and return the raw body bytes.
    pub async fn request_raw(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(path);

        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie_header);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                if value.is_empty() {
                    self.cookies.remove(name);
                } else {
                    self.cookies.insert(name.to_owned(), value.to_owned());
                }
            }
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn post_empty(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::POST, path, None).await
    }

    pub async fn delete(&mut self, path: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None).await
    }
}

/// Walk a storefront client's wizard through a full configuration and into
/// the cart.
pub async fn add_boost_to_cart(
    client: &mut Client,
    platform: &str,
    boost_type: &str,
    quantity_label: &str,
    whatsapp: &str,
) -> Value {
    let (status, _) = client.post_empty("/wizard").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client
        .post("/wizard/platform", serde_json::json!({ "platform": platform }))
        .await;
    assert_eq!(status, StatusCode::OK, "platform select failed");

    let (status, _) = client
        .post(
            "/wizard/boost-type",
            serde_json::json!({ "boost_type": boost_type }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "boost-type select failed");

    let (status, _) = client
        .post(
            "/wizard/quantity",
            serde_json::json!({ "quantity_label": quantity_label }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "quantity select failed");

    let (status, _) = client
        .post(
            "/wizard/details",
            serde_json::json!({
                "link": format!("https://{platform}.example.com/target"),
                "whatsapp": whatsapp,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "details submit failed");

    let (status, body) = client.post_empty("/wizard/add-to-cart").await;
    assert_eq!(status, StatusCode::OK, "add-to-cart failed: {body}");
    body
}
