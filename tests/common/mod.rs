#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{HeaderMap, Method, Request, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use square_fulfill::AppState;
use square_fulfill::config::ErrorStatus;
use square_fulfill::domain::error::ClientError;
use square_fulfill::domain::fulfillment::{FunctionResult, PendingTransaction};
use square_fulfill::domain::id::OrderId;
use square_fulfill::domain::order::{LineItem, Order};
use square_fulfill::domain::provider::{ClientFuture, FunctionInvoker, OrderProvider, RecordStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const ORDER_PAYLOAD: &str = r#"{"type":"payment.updated","data":{"object":{"payment":{"order_id":"O1"}}}}"#;

pub fn order_with_package(package_id: &str) -> Order {
    Order {
        line_items: vec![LineItem {
            catalog_object_id: Some(package_id.into()),
        }],
    }
}

// ── Fakes ──────────────────────────────────────────────────────────────────

pub struct FakeOrders {
    result: Result<Order, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeOrders {
    pub fn ok(order: Order) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(order),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl OrderProvider for FakeOrders {
    fn retrieve_order<'a>(&'a self, order_id: &'a OrderId) -> ClientFuture<'a, Order> {
        self.calls.lock().unwrap().push(order_id.to_string());
        let result = self.result.clone().map_err(ClientError::Api);
        Box::pin(async move { result })
    }
}

pub struct FakeRecords {
    result: Result<Vec<String>, String>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl FakeRecords {
    pub fn with_customers(customer_ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(customer_ids.iter().map(|c| c.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RecordStore for FakeRecords {
    fn pending_transactions<'a>(
        &'a self,
        order_id: &'a OrderId,
        limit: u32,
    ) -> ClientFuture<'a, Vec<PendingTransaction>> {
        self.calls.lock().unwrap().push((order_id.to_string(), limit));
        let result = self
            .result
            .clone()
            .map(|ids| {
                ids.into_iter()
                    .take(limit as usize)
                    .map(|original_square_customer_id| PendingTransaction {
                        original_square_customer_id,
                    })
                    .collect()
            })
            .map_err(ClientError::Api);
        Box::pin(async move { result })
    }
}

pub struct FakeInvoker {
    result: Result<FunctionResult, String>,
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl FakeInvoker {
    pub fn ok() -> Arc<Self> {
        Self::returning(FunctionResult::ok(json!({"granted": true})))
    }

    pub fn returning(result: FunctionResult) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(result),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl FunctionInvoker for FakeInvoker {
    fn invoke<'a>(
        &'a self,
        function: &'a str,
        body: &'a Value,
    ) -> ClientFuture<'a, FunctionResult> {
        self.calls
            .lock()
            .unwrap()
            .push((function.to_string(), body.clone()));
        let result = self.result.clone().map_err(ClientError::Api);
        Box::pin(async move { result })
    }
}

pub fn app_state(
    orders: Arc<FakeOrders>,
    records: Arc<FakeRecords>,
    functions: Arc<FakeInvoker>,
    error_status: ErrorStatus,
) -> AppState {
    AppState {
        orders,
        records,
        functions,
        error_status,
    }
}

/// Send one request through the router and collect status and body text.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ── Stub upstream servers ──────────────────────────────────────────────────

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub const SQUARE_TOKEN: &str = "sq-test-token";
pub const SERVICE_KEY: &str = "service-role-test";

/// Square Orders API: knows order `O1` (package `PKG1`) and `EMPTY` (no line items).
pub fn square_stub() -> Router {
    async fn retrieve(headers: HeaderMap, Path(order_id): Path<String>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {SQUARE_TOKEN}"));
        if !authorized || headers.get("square-version").is_none() {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"errors": [{
                    "category": "AUTHENTICATION_ERROR",
                    "code": "UNAUTHORIZED",
                    "detail": "This request could not be authorized."
                }]})),
            );
        }
        match order_id.as_str() {
            "O1" => (
                StatusCode::OK,
                Json(json!({"order": {
                    "id": "O1",
                    "line_items": [
                        {"uid": "li1", "name": "Gold", "quantity": "1", "catalog_object_id": "PKG1"},
                        {"uid": "li2", "name": "Extra", "quantity": "1", "catalog_object_id": "PKG2"}
                    ]
                }})),
            ),
            "EMPTY" => (
                StatusCode::OK,
                Json(json!({"order": {"id": "EMPTY", "line_items": []}})),
            ),
            _ => (
                StatusCode::NOT_FOUND,
                Json(json!({"errors": [{
                    "category": "INVALID_REQUEST_ERROR",
                    "code": "NOT_FOUND",
                    "detail": format!("Order {order_id} not found.")
                }]})),
            ),
        }
    }

    Router::new().route("/v2/orders/{order_id}", get(retrieve))
}

/// Supabase: `pending_transactions` maps `O1` and `EMPTY` to `C1`;
/// `square-payment-callback` rejects package `BAD`.
pub fn supabase_stub(invocations: Arc<Mutex<Vec<Value>>>) -> Router {
    async fn select(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some(SERVICE_KEY) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid API key"})),
            );
        }
        if params.get("select").map(String::as_str) != Some("original_square_customer_id")
            || params.get("limit").map(String::as_str) != Some("1")
        {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"code": "PGRST100", "message": "unexpected query"})),
            );
        }
        match params.get("square_order_id").map(String::as_str) {
            Some("eq.O1") | Some("eq.EMPTY") => (
                StatusCode::OK,
                Json(json!([{"original_square_customer_id": "C1"}])),
            ),
            Some("eq.BROKEN") => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"code": "42P01", "message": "relation \"pending_transactions\" does not exist"})),
            ),
            _ => (StatusCode::OK, Json(json!([]))),
        }
    }

    let invoke = move |Path(name): Path<String>, Json(body): Json<Value>| {
        let invocations = invocations.clone();
        async move {
            if name != "square-payment-callback" {
                return (StatusCode::NOT_FOUND, Json(json!({"error": "function not found"})));
            }
            invocations.lock().unwrap().push(body.clone());
            if body["package_id"] == "BAD" {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "unknown package"})));
            }
            (StatusCode::OK, Json(json!({"granted": true})))
        }
    };

    Router::new()
        .route("/rest/v1/pending_transactions", get(select))
        .route("/functions/v1/{name}", post(invoke))
}
