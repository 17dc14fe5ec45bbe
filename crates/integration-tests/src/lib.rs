//! End-to-end test harness for the Freshly Store admin panel.
//!
//! Each [`TestContext`] starts two servers on ephemeral ports:
//!
//! - a stub store backend answering the `/api/*` endpoints with canned data
//! - the admin panel itself, built with `freshly_admin::routes::app`
//!
//! and a `reqwest` client with a cookie store, so tests drive the panel the way
//! a browser would.
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = TestContext::start(Backend::default()).await;
//! ctx.sign_in().await;
//! let html = ctx.loaded_dashboard().await;
//! assert!(html.contains("Fresh Mart"));
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used, clippy::unused_async)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use freshly_admin::{config::AdminConfig, routes, state::AppState};
use serde::Deserialize;
use serde_json::{Value, json};

/// Password the stub backend accepts.
pub const VALID_PASSWORD: &str = "correct-horse";

/// Email the stub backend refuses to register again.
pub const TAKEN_EMAIL: &str = "taken@freshly.example";

/// Behavior of the stub store backend.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Shop name from `/api/shop/info`; `None` omits the field.
    pub shop_name: Option<String>,
    /// Answer `/api/dashboard/stats` with a 500.
    pub fail_stats: bool,
    /// Delay applied to every dashboard resource call.
    pub latency: Duration,
    /// Answer a successful sign-up with a plain-text body instead of JSON.
    pub plain_text_signup: bool,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            shop_name: Some("Fresh Mart".to_string()),
            fail_stats: false,
            latency: Duration::ZERO,
            plain_text_signup: false,
        }
    }
}

#[derive(Default)]
struct Counters {
    resource_calls: AtomicUsize,
    last_orders_limit: AtomicU32,
}

#[derive(Clone)]
struct BackendState {
    behavior: Backend,
    counters: Arc<Counters>,
}

/// Running admin panel plus its stub backend.
pub struct TestContext {
    pub admin_url: String,
    pub client: reqwest::Client,
    counters: Arc<Counters>,
}

impl TestContext {
    /// Start the stub backend and the admin panel pointed at it.
    pub async fn start(behavior: Backend) -> Self {
        let counters = Arc::new(Counters::default());
        let backend_addr = serve(stub_backend(BackendState {
            behavior,
            counters: Arc::clone(&counters),
        }))
        .await;

        let backend_url = format!("http://{backend_addr}");
        let config = AdminConfig::from_vars(|key| match key {
            "FRESHLY_API_URL" => Some(backend_url.clone()),
            "FRESHLY_API_TIMEOUT_SECS" => Some("5".to_string()),
            "DASHBOARD_ORDERS_LIMIT" => Some("5".to_string()),
            _ => None,
        })
        .expect("valid test configuration");

        let state = AppState::new(config).expect("admin state");
        let admin_addr = serve(routes::app(state)).await;

        Self {
            admin_url: format!("http://{admin_addr}"),
            client: browser(),
            counters,
        }
    }

    /// A second browser against the same panel, with its own cookie jar.
    #[must_use]
    pub fn another_browser(&self) -> Self {
        Self {
            admin_url: self.admin_url.clone(),
            client: browser(),
            counters: Arc::clone(&self.counters),
        }
    }

    /// Absolute URL of an admin path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// GET an admin page, following redirects.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("admin request")
    }

    /// POST a form to the admin panel, following redirects.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("admin request")
    }

    /// Sign in with valid credentials.
    pub async fn sign_in(&self) -> reqwest::Response {
        self.post_form(
            "/signin",
            &[("email", "owner@freshly.example"), ("password", VALID_PASSWORD)],
        )
        .await
    }

    /// Poll the dashboard until the loading panel is gone; returns the page.
    pub async fn loaded_dashboard(&self) -> String {
        for _ in 0..200 {
            let html = self
                .get("/dashboard")
                .await
                .text()
                .await
                .expect("dashboard body");
            if !html.contains("Loading dashboard...") {
                return html;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("dashboard never finished loading");
    }

    /// Dashboard resource calls received by the stub backend so far.
    #[must_use]
    pub fn resource_calls(&self) -> usize {
        self.counters.resource_calls.load(Ordering::SeqCst)
    }

    /// `limit` of the most recent orders call.
    #[must_use]
    pub fn last_orders_limit(&self) -> u32 {
        self.counters.last_orders_limit.load(Ordering::SeqCst)
    }
}

fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

// =============================================================================
// Stub backend
// =============================================================================

fn stub_backend(state: BackendState) -> Router {
    Router::new()
        .route("/api/auth/signin", post(signin))
        .route("/api/auth/signup", post(signup))
        .route("/api/dashboard/stats", get(stats))
        .route("/api/orders", get(orders))
        .route("/api/products", get(products))
        .route("/api/customers", get(customers))
        .route("/api/shop/info", get(shop_info))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn resource_call(state: &BackendState) {
    state.counters.resource_calls.fetch_add(1, Ordering::SeqCst);
    if !state.behavior.latency.is_zero() {
        tokio::time::sleep(state.behavior.latency).await;
    }
}

async fn signin(Json(body): Json<Value>) -> Response {
    if body["password"] == VALID_PASSWORD {
        Json(json!({
            "token": "tok-integration",
            "user": { "firstName": "Amaya", "lastName": "Fernando", "email": body["email"] }
        }))
        .into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn signup(State(state): State<BackendState>, Json(body): Json<Value>) -> Response {
    if body["email"] == TAKEN_EMAIL {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    if body["shopName"].as_str().is_none_or(str::is_empty) {
        return error(StatusCode::BAD_REQUEST, "shopName is required");
    }
    if body["password"].as_str().is_none_or(str::is_empty) {
        return error(StatusCode::BAD_REQUEST, "password is required");
    }
    if state.behavior.plain_text_signup {
        return (StatusCode::CREATED, "User registered").into_response();
    }
    (StatusCode::CREATED, Json(json!({ "message": "Account created" }))).into_response()
}

async fn stats(State(state): State<BackendState>) -> Response {
    resource_call(&state).await;
    if state.behavior.fail_stats {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Stats unavailable");
    }
    Json(json!([
        { "label": "Total Shops", "value": 56, "colorClass": "text-green-600", "icon": "shops" },
        { "label": "Pending Orders", "value": 23, "colorClass": "text-green-600", "icon": "orders" },
        { "label": "Revenue", "value": "$4,230", "colorClass": "text-green-600", "icon": "revenue" }
    ]))
    .into_response()
}

#[derive(Deserialize)]
struct OrdersQuery {
    limit: Option<u32>,
}

async fn orders(State(state): State<BackendState>, Query(query): Query<OrdersQuery>) -> Response {
    resource_call(&state).await;
    if let Some(limit) = query.limit {
        state.counters.last_orders_limit.store(limit, Ordering::SeqCst);
    }
    Json(json!([
        { "_id": "o1", "orderId": "ORD-4839", "customerName": "Nimali Perera", "amount": 1250.5, "status": "Delivered" },
        { "_id": "o2", "orderId": "ORD-4840", "customerName": "Kasun Silva", "amount": 89, "status": "Processing" },
        { "_id": "o3", "orderId": "ORD-4841", "customerName": "Dilani Jayasuriya", "amount": "42.00", "status": "Pending" },
        { "_id": "o4", "orderId": "ORD-4842", "customerName": "Ruwan Dias", "amount": 15, "status": "Unknown" }
    ]))
    .into_response()
}

async fn products(State(state): State<BackendState>) -> Response {
    resource_call(&state).await;
    Json(json!([
        { "_id": "p1", "name": "Red Apples", "sku": "APL-001", "price": 1.2, "stock": 40, "category": "Fruit" },
        { "_id": "p2", "name": "Kithul Treacle", "sku": "KTH-010", "price": 7, "stock": 0, "category": "Pantry" }
    ]))
    .into_response()
}

async fn customers(State(state): State<BackendState>) -> Response {
    resource_call(&state).await;
    Json(json!([
        { "_id": "c1", "name": "Nimali Perera", "email": "nimali@example.com", "phone": "0771234567", "totalOrders": 12 }
    ]))
    .into_response()
}

async fn shop_info(State(state): State<BackendState>) -> Response {
    resource_call(&state).await;
    match &state.behavior.shop_name {
        Some(name) => Json(json!({ "name": name })).into_response(),
        None => Json(json!({})).into_response(),
    }
}
