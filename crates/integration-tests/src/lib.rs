//! Integration tests for the Kanap storefront client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kanap-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalogServer`] serves the
//! catalog API from an in-process `axum` router on an ephemeral port, and
//! the tests drive the real `reqwest`-based client against it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

/// An in-process fake of the catalog HTTP API.
///
/// The server stops when this value is dropped.
pub struct FakeCatalogServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct ServerState {
    products: Vec<Value>,
    orders: Mutex<Vec<Value>>,
    product_hits: Mutex<HashMap<String, usize>>,
    fail_orders: AtomicBool,
}

impl FakeCatalogServer {
    /// Start a server seeded with [`sample_products`].
    pub async fn start() -> Self {
        Self::with_products(sample_products()).await
    }

    /// Start a server serving `products` (catalog JSON records).
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_products(products: Vec<Value>) -> Self {
        let state = Arc::new(ServerState {
            products,
            ..ServerState::default()
        });

        let app = Router::new()
            .route("/api/products/", get(list_products))
            .route("/api/products/{id}", get(get_product))
            .route("/api/products/order", post(create_order))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake catalog server error");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL to configure the client with.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    /// Order payloads received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<Value> {
        self.state
            .orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `GET /products/{id}` was served for `id`.
    #[must_use]
    pub fn product_hits(&self, id: &str) -> usize {
        self.state
            .product_hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    /// Make order submission answer `500`.
    pub fn fail_orders(&self, fail: bool) {
        self.state.fail_orders.store(fail, Ordering::SeqCst);
    }
}

impl Drop for FakeCatalogServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Two sofas in the catalog's wire format.
#[must_use]
pub fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "colors": ["Blue", "White", "Black"],
            "_id": "107fb5b75607497b96722bda5b504926",
            "name": "Kanap Sinopé",
            "price": 1849,
            "imageUrl": "http://localhost:3000/images/kanap01.jpeg",
            "description": "Excepteur sint occaecat cupidatat non proident.",
            "altTxt": "Photo d'un canapé bleu, deux places"
        }),
        json!({
            "colors": ["Black/Yellow", "Black/Red"],
            "_id": "415b7cacb65d43b2b5c1ff70f3393ad1",
            "name": "Kanap Cyllène",
            "price": 4499,
            "imageUrl": "http://localhost:3000/images/kanap02.jpeg",
            "description": "Morbi nec erat aliquam, sagittis urna non, laoreet justo.",
            "altTxt": "Photo d'un canapé jaune et noir, quatre places"
        }),
    ]
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(State(state): State<Arc<ServerState>>) -> Json<Vec<Value>> {
    Json(state.products.clone())
}

async fn get_product(State(state): State<Arc<ServerState>>, Path(id): Path<String>) -> Response {
    *state
        .product_hits
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id.clone())
        .or_default() += 1;

    state
        .products
        .iter()
        .find(|p| p.get("_id").and_then(Value::as_str) == Some(id.as_str()))
        .map_or_else(
            || (StatusCode::NOT_FOUND, Json(json!({ "message": "Product not found" }))).into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

async fn create_order(State(state): State<Arc<ServerState>>, Json(body): Json<Value>) -> Response {
    if state.fail_orders.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "order service down").into_response();
    }

    let has_contact = body.get("contact").is_some_and(Value::is_object);
    let has_products = body
        .get("products")
        .and_then(Value::as_array)
        .is_some_and(|p| !p.is_empty());
    if !has_contact || !has_products {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let mut orders = state.orders.lock().unwrap_or_else(PoisonError::into_inner);
    orders.push(body.clone());
    let order_id = format!("order-{}", orders.len());

    (
        StatusCode::CREATED,
        Json(json!({
            "contact": body["contact"],
            "products": body["products"],
            "orderId": order_id
        })),
    )
        .into_response()
}
