//! Freshly Store backend API client.
//!
//! # Architecture
//!
//! - [`DataGateway`] is the read-only seam the dashboard controller depends on:
//!   one operation per resource, each making exactly one outbound request
//! - [`StoreApiClient`] implements it over `reqwest`, and also carries the
//!   sign-in / sign-up calls used by the auth pages
//! - No retries, no caching; the backend is the source of truth
//!
//! # Example
//!
//! ```rust,ignore
//! use freshly_admin::store_api::{DataGateway, StoreApiClient};
//!
//! let client = StoreApiClient::new(&config.store_api)?;
//!
//! let orders = client.fetch_orders(5).await?;
//! let shop = client.fetch_shop_profile().await?;
//! ```

mod auth;
mod client;

pub use auth::{
    AuthFailure, SIGN_IN_FALLBACK, SIGN_UP_FALLBACK, SignInRequest, SignInResponse, SignUpRequest,
};
pub use client::StoreApiClient;

use std::future::Future;

use freshly_core::{Customer, DashboardStat, Order, Product, ShopProfile};
use thiserror::Error;

/// Errors raised by a single backend call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network failure: connect, timeout, TLS, or body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        /// `message` field of the error payload, when present.
        message: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TransportError {
    /// Backend-supplied message, if the failure carried one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Read access to the store resources shown on the dashboard.
///
/// Implementations perform one outbound call per invocation and report every
/// failure as a [`TransportError`].
pub trait DataGateway: Send + Sync + 'static {
    /// `GET /api/dashboard/stats`
    fn fetch_stats(&self)
    -> impl Future<Output = Result<Vec<DashboardStat>, TransportError>> + Send;

    /// `GET /api/orders?limit=N`
    fn fetch_orders(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Order>, TransportError>> + Send;

    /// `GET /api/products`
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, TransportError>> + Send;

    /// `GET /api/customers`
    fn fetch_customers(
        &self,
    ) -> impl Future<Output = Result<Vec<Customer>, TransportError>> + Send;

    /// `GET /api/shop/info`
    fn fetch_shop_profile(
        &self,
    ) -> impl Future<Output = Result<ShopProfile, TransportError>> + Send;
}
