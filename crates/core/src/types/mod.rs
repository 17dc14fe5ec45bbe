//! Core types for Freshly Store.
//!
//! Entities mirror the JSON returned by the store backend (camelCase keys).

pub mod customer;
pub mod dashboard;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod tab;

pub use customer::Customer;
pub use dashboard::{DashboardStat, NO_SHOP_NAME, ShopProfile, StatValue};
pub use id::*;
pub use order::Order;
pub use price::Price;
pub use product::Product;
pub use status::{BadgeTone, OrderStatus};
pub use tab::{Tab, UnknownTab};
