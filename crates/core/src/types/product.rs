//! Products in the shop catalogue.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalogue product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Price,
    /// Units on hand.
    pub stock: i64,
    pub category: String,
}

impl Product {
    /// Whether the product has no stock left.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }
}
