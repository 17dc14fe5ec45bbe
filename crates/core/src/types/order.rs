//! Orders as listed by the store backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, OrderNumber};
use super::price::Price;
use super::status::OrderStatus;

/// A customer order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Backend record ID.
    #[serde(alias = "_id")]
    pub id: OrderId,
    /// Human-facing order reference.
    pub order_id: OrderNumber,
    /// Name of the ordering customer.
    pub customer_name: String,
    /// Order total.
    pub amount: Price,
    /// Current status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
}
