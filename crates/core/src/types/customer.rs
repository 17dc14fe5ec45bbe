//! Shop customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CustomerId;

/// A registered customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(alias = "_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Number of orders placed so far.
    pub total_orders: i64,
    /// When the customer signed up.
    pub created_at: Option<DateTime<Utc>>,
}
