//! Canned catalog API used for local runs and integration tests.
//!
//! Serves the same routes as the real catalog under `/api/v1` and records
//! every publish it receives.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishedEvent {
    pub destination: String,
    pub authorization: Option<String>,
    pub payload: Value,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Clone)]
pub struct MockCatalog {
    products: Vec<Value>,
    products_status: StatusCode,
    streams: HashMap<String, Vec<Value>>,
    streams_status: HashMap<String, StatusCode>,
    last_messages: HashMap<String, CannedResponse>,
    publish_status: StatusCode,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            products_status: StatusCode::OK,
            streams: HashMap::new(),
            streams_status: HashMap::new(),
            last_messages: HashMap::new(),
            publish_status: StatusCode::OK,
        }
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(mut self, product: Value) -> Self {
        if let Some(id) = product.get("id").and_then(Value::as_str) {
            self.streams.entry(id.to_string()).or_default();
        }
        self.products.push(product);
        self
    }

    pub fn stream(mut self, product_id: &str, stream: Value) -> Self {
        self.streams
            .entry(product_id.to_string())
            .or_default()
            .push(stream);
        self
    }

    pub fn last_message(mut self, stream_id: &str, status: u16, body: Value) -> Self {
        self.last_messages.insert(
            stream_id.to_string(),
            CannedResponse {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body,
            },
        );
        self
    }

    pub fn products_status(mut self, status: u16) -> Self {
        self.products_status =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self
    }

    /// Answers the stream list of one product with `status` and no body.
    pub fn streams_status(mut self, product_id: &str, status: u16) -> Self {
        self.streams_status.insert(
            product_id.to_string(),
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        );
        self
    }

    pub fn publish_status(mut self, status: u16) -> Self {
        self.publish_status =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self
    }

    /// Small catalog touching every bucket, with timestamps relative to now.
    pub fn demo() -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let hour = 3_600_000;

        Self::new()
            .product(json!({"id": "weather", "name": "Weather", "type": "NORMAL", "isFree": true}))
            .product(json!({"id": "traffic", "name": "Traffic", "type": "DATA_UNION", "isFree": false}))
            .product(json!({"id": "legacy", "name": "Legacy", "type": "DATAUNION", "isFree": true}))
            .stream("weather", json!({"id": "0xdemo/weather/live", "inactivityThresholdHours": 2}))
            .stream("weather", json!({"id": "0xdemo/weather/stale", "inactivityThresholdHours": 2}))
            .stream("traffic", json!({"id": "0xdemo/traffic", "inactivityThresholdHours": 24}))
            .stream("legacy", json!({"id": "0xdemo/legacy", "inactivityThresholdHours": 48}))
            .last_message(
                "0xdemo/weather/live",
                200,
                json!([{"timestamp": now - hour, "content": {"temperature": 18.4}}]),
            )
            .last_message(
                "0xdemo/weather/stale",
                200,
                json!([{"timestamp": now - 5 * hour, "content": {"temperature": 11.0}}]),
            )
            .last_message("0xdemo/traffic", 403, json!({"error": "no access", "code": "FORBIDDEN"}))
            .last_message("0xdemo/legacy", 200, json!([]))
    }

    pub fn router(self) -> (Router, MockHandles) {
        let handles = MockHandles::default();
        let state = AppState {
            catalog: Arc::new(self),
            handles: handles.clone(),
        };

        let router = Router::new()
            .route("/api/v1/products", get(list_products))
            .route("/api/v1/products/:id/streams", get(list_streams))
            .route(
                "/api/v1/streams/:id/data/partitions/0/last",
                get(last_message),
            )
            .route("/api/v1/streams/:id/data", post(publish))
            .with_state(state);

        (router, handles)
    }

    /// Serves on an ephemeral localhost port until the returned server is dropped.
    pub async fn spawn(self) -> anyhow::Result<MockServer> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (router, handles) = self.router();

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Mock catalog stopped: {}", e);
            }
        });

        Ok(MockServer { addr, handles, task })
    }
}

/// Shared views into what the server has seen.
#[derive(Debug, Clone, Default)]
pub struct MockHandles {
    published: Arc<RwLock<Vec<PublishedEvent>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockHandles {
    pub async fn published(&self) -> Vec<PublishedEvent> {
        self.published.read().await.clone()
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    async fn log(&self, request: String) {
        self.requests.write().await.push(request);
    }
}

pub struct MockServer {
    addr: SocketAddr,
    handles: MockHandles,
    task: JoinHandle<()>,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub fn handles(&self) -> &MockHandles {
        &self.handles
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<MockCatalog>,
    handles: MockHandles,
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.handles.log("GET /products".to_string()).await;

    if query.get("publicAccess").map(String::as_str) != Some("true") {
        return (StatusCode::BAD_REQUEST, "publicAccess=true is required").into_response();
    }

    if !state.catalog.products_status.is_success() {
        return (state.catalog.products_status, "catalog unavailable").into_response();
    }

    Json(state.catalog.products.clone()).into_response()
}

async fn list_streams(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    state.handles.log(format!("GET /products/{}/streams", id)).await;

    if let Some(status) = state.catalog.streams_status.get(&id) {
        return (*status, "stream list unavailable").into_response();
    }

    match state.catalog.streams.get(&id) {
        Some(streams) => Json(streams.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

async fn last_message(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    state.handles.log(format!("GET /streams/{}/last", id)).await;

    match state.catalog.last_messages.get(&id) {
        Some(canned) => (canned.status, Json(canned.body.clone())).into_response(),
        None => (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response(),
    }
}

async fn publish(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    state.handles.log(format!("POST /streams/{}/data", id)).await;

    if !state.catalog.publish_status.is_success() {
        return (state.catalog.publish_status, "publish rejected").into_response();
    }

    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    info!("Received publish for '{}'", id);
    state.handles.published.write().await.push(PublishedEvent {
        destination: id,
        authorization,
        payload,
    });

    StatusCode::OK.into_response()
}
