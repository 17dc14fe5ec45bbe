//! Shop-owner dashboard: data loading, view state, and tab rendering.
//!
//! # Architecture
//!
//! - [`DashboardController`] fans out one batch of five gateway calls per load
//!   and applies each completion to its own slot; stale batches are dropped
//! - [`TabView`] maps a [`DashboardSnapshot`] to the panel for the active tab
//! - Routes in `crate::routes::dashboard` drive both from HTTP requests
//!
//! # Example
//!
//! ```rust,ignore
//! let dashboard = DashboardController::new(client, config.dashboard);
//! dashboard.refresh().await;
//!
//! let snapshot = dashboard.snapshot().await;
//! let html = TabView::from_snapshot(&snapshot).render()?;
//! ```

mod controller;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{
    DashboardController, DashboardSnapshot, LoadBatch, RESOURCE_COUNT, Resource, ViewState,
};
pub use view::{
    CustomerRowView, OrderRowView, ProductRowView, Section, StatCardView, TabView, stat_icon_class,
};
