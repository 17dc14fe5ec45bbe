//! `reqwest` implementation of the store backend client.

use std::sync::Arc;

use freshly_core::{Customer, DashboardStat, Order, Product, ShopProfile};
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;
use url::Url;

use crate::config::StoreApiConfig;

use super::{DataGateway, TransportError, auth::ErrorPayload};

/// Freshly Store backend client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct StoreApiClient {
    inner: Arc<StoreApiClientInner>,
}

struct StoreApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for StoreApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StoreApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the HTTP client cannot be built.
    pub fn new(config: &StoreApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("freshly-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(StoreApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an API path (e.g. `api/orders`) against the base URL.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.inner.base_url.join(path)?)
    }

    pub(super) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner.client.request(method, url)
    }

    /// Execute a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        send_json(self.request(Method::GET, url)).await
    }

    /// Execute a POST with a JSON body and decode the JSON response.
    pub(super) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        send_json(self.request(Method::POST, url).json(body)).await
    }

    /// Execute a POST with a JSON body where any 2xx counts as success.
    ///
    /// The success body is not read as JSON.
    pub(super) async fn post_accepted<B>(&self, path: &str, body: &B) -> Result<(), TransportError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        send(self.request(Method::POST, url).json(body)).await?;
        Ok(())
    }
}

/// Send a request and map non-2xx statuses to `TransportError::Status`.
///
/// Returns the raw success body.
async fn send(request: RequestBuilder) -> Result<Vec<u8>, TransportError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorPayload>(&body)
            .ok()
            .and_then(|payload| payload.message)
            .filter(|m| !m.trim().is_empty());
        tracing::debug!(status = status.as_u16(), ?message, "Backend returned error status");
        return Err(TransportError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body.to_vec())
}

/// Send a request and decode the JSON success body.
///
/// The body is read as bytes first so malformed JSON surfaces as
/// `TransportError::Parse` rather than a generic HTTP error.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, TransportError> {
    let body = send(request).await?;

    // Some endpoints answer 204 / empty body on success; treat as JSON null.
    if body.is_empty() {
        return Ok(serde_json::from_slice(b"null")?);
    }

    Ok(serde_json::from_slice(&body)?)
}

impl DataGateway for StoreApiClient {
    #[instrument(skip(self))]
    async fn fetch_stats(&self) -> Result<Vec<DashboardStat>, TransportError> {
        self.get_json("api/dashboard/stats", &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_orders(&self, limit: u32) -> Result<Vec<Order>, TransportError> {
        self.get_json("api/orders", &[("limit", limit.to_string())])
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, TransportError> {
        self.get_json("api/products", &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_customers(&self) -> Result<Vec<Customer>, TransportError> {
        self.get_json("api/customers", &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_shop_profile(&self) -> Result<ShopProfile, TransportError> {
        self.get_json("api/shop/info", &[]).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> StoreApiClient {
        StoreApiClient::new(&StoreApiConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = client("http://localhost:5000");
        assert_eq!(
            client.endpoint("api/orders").unwrap().as_str(),
            "http://localhost:5000/api/orders"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = client("https://example.com/freshly/");
        assert_eq!(
            client.endpoint("api/shop/info").unwrap().as_str(),
            "https://example.com/freshly/api/shop/info"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_without_trailing_slash() {
        let client = client("https://example.com/freshly");
        assert_eq!(
            client.endpoint("api/orders").unwrap().as_str(),
            "https://example.com/freshly/api/orders"
        );
    }

    #[test]
    fn test_debug_shows_base_url_only() {
        let debug = format!("{:?}", client("http://localhost:5000"));
        assert!(debug.contains("http://localhost:5000/"));
    }
}
