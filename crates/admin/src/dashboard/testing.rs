//! In-process gateways for controller and route tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use freshly_core::{Customer, DashboardStat, Order, Product, ShopProfile};
use serde_json::json;
use tokio::sync::oneshot;

use crate::store_api::{DataGateway, TransportError};

pub fn unavailable() -> TransportError {
    TransportError::Status {
        status: 503,
        message: Some("Service unavailable".to_string()),
    }
}

pub fn stats(label: &str) -> Vec<DashboardStat> {
    serde_json::from_value(json!([
        {"label": label, "value": 56, "colorClass": "text-green-600", "icon": "shops"},
        {"label": "Revenue", "value": "$4,230", "colorClass": "text-green-600", "icon": "revenue"}
    ]))
    .unwrap()
}

pub fn orders(customer: &str) -> Vec<Order> {
    serde_json::from_value(json!([
        {"_id": "o1", "orderId": "ORD-1001", "customerName": customer, "amount": 42.5, "status": "Pending"},
        {"_id": "o2", "orderId": 1002, "customerName": "Nimal Perera", "amount": "19.99", "status": "refunded"}
    ]))
    .unwrap()
}

pub fn products(name: &str) -> Vec<Product> {
    serde_json::from_value(json!([
        {"_id": "p1", "name": name, "sku": "APL-001", "price": 1.2, "stock": 40, "category": "Fruit"},
        {"_id": "p2", "name": "Kithul Treacle", "sku": "KTH-010", "price": 7, "stock": 0, "category": "Pantry"}
    ]))
    .unwrap()
}

pub fn customers(name: &str) -> Vec<Customer> {
    serde_json::from_value(json!([
        {"_id": "c1", "name": name, "email": "amaya@example.com", "phone": "0771234567", "totalOrders": 3}
    ]))
    .unwrap()
}

/// Answers every call immediately with fixed data.
#[derive(Default)]
pub struct StaticGateway {
    pub fail_stats: bool,
    pub shop_name: Option<String>,
    pub last_limit: AtomicU32,
    pub calls: AtomicUsize,
}

impl StaticGateway {
    pub fn named(shop: &str) -> Self {
        Self {
            shop_name: Some(shop.to_string()),
            ..Self::default()
        }
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl DataGateway for StaticGateway {
    async fn fetch_stats(&self) -> Result<Vec<DashboardStat>, TransportError> {
        self.hit();
        if self.fail_stats {
            return Err(unavailable());
        }
        Ok(stats("Total Shops"))
    }

    async fn fetch_orders(&self, limit: u32) -> Result<Vec<Order>, TransportError> {
        self.hit();
        self.last_limit.store(limit, Ordering::SeqCst);
        Ok(orders("Amaya Fernando"))
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, TransportError> {
        self.hit();
        Ok(products("Red Apples"))
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, TransportError> {
        self.hit();
        Ok(customers("Amaya Fernando"))
    }

    async fn fetch_shop_profile(&self) -> Result<ShopProfile, TransportError> {
        self.hit();
        Ok(ShopProfile {
            name: self.shop_name.clone(),
        })
    }
}

type Reply<T> = Result<T, TransportError>;

/// Queue of pending replies for one resource.
struct Gate<T> {
    pending: Mutex<VecDeque<oneshot::Receiver<Reply<T>>>>,
}

impl<T> Default for Gate<T> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T: Send> Gate<T> {
    fn push(&self) -> oneshot::Sender<Reply<T>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back(rx);
        tx
    }

    async fn next(&self, calls: &AtomicUsize) -> Reply<T> {
        let rx = self.pending.lock().unwrap().pop_front();
        calls.fetch_add(1, Ordering::SeqCst);
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(unavailable())),
            None => Err(unavailable()),
        }
    }
}

/// Senders resolving one batch of calls on a [`GatedGateway`].
pub struct BatchReplies {
    pub stats: oneshot::Sender<Reply<Vec<DashboardStat>>>,
    pub orders: oneshot::Sender<Reply<Vec<Order>>>,
    pub products: oneshot::Sender<Reply<Vec<Product>>>,
    pub customers: oneshot::Sender<Reply<Vec<Customer>>>,
    pub shop: oneshot::Sender<Reply<ShopProfile>>,
}

impl BatchReplies {
    /// Resolve every call successfully, tagging the data with `tag`.
    pub fn succeed(self, tag: &str) {
        let _ = self.stats.send(Ok(stats(tag)));
        let _ = self.orders.send(Ok(orders(tag)));
        let _ = self.products.send(Ok(products(tag)));
        let _ = self.customers.send(Ok(customers(tag)));
        let _ = self.shop.send(Ok(ShopProfile::new(tag)));
    }
}

/// Holds each call open until the test resolves it.
///
/// Calls are matched to [`BatchReplies`] in the order batches were armed.
#[derive(Default)]
pub struct GatedGateway {
    stats: Gate<Vec<DashboardStat>>,
    orders: Gate<Vec<Order>>,
    products: Gate<Vec<Product>>,
    customers: Gate<Vec<Customer>>,
    shop: Gate<ShopProfile>,
    calls: AtomicUsize,
}

impl GatedGateway {
    /// Prepare replies for the next batch of five calls.
    pub fn arm(&self) -> BatchReplies {
        BatchReplies {
            stats: self.stats.push(),
            orders: self.orders.push(),
            products: self.products.push(),
            customers: self.customers.push(),
            shop: self.shop.push(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Yield until at least `n` calls have been issued.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

impl DataGateway for GatedGateway {
    async fn fetch_stats(&self) -> Result<Vec<DashboardStat>, TransportError> {
        self.stats.next(&self.calls).await
    }

    async fn fetch_orders(&self, _limit: u32) -> Result<Vec<Order>, TransportError> {
        self.orders.next(&self.calls).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, TransportError> {
        self.products.next(&self.calls).await
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, TransportError> {
        self.customers.next(&self.calls).await
    }

    async fn fetch_shop_profile(&self) -> Result<ShopProfile, TransportError> {
        self.shop.next(&self.calls).await
    }
}
