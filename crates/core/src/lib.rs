//! Freshly Core - Shared domain types.
//!
//! This crate provides the types used by the Freshly Store admin panel:
//! - dashboard statistics and the shop profile
//! - orders, products and customers as returned by the store backend
//! - the dashboard tab identifiers and order status classification
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entities, newtype IDs, prices, statuses and tabs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
