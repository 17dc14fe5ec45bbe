//! Freshly Store admin panel library.
//!
//! Server-rendered shop-owner panel: sign-in / sign-up against the store
//! backend, and a dashboard that loads stats, orders, products, customers and
//! the shop profile concurrently, tolerating individual failures.
//!
//! Exposed as a library so the binary and the integration tests build the
//! same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store_api;
