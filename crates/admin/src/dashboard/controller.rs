//! Dashboard view-state controller.
//!
//! Owns the tab selection, sidebar state, loading flag and the four resource
//! collections plus the shop profile. A load issues all five gateway calls
//! concurrently; each completion replaces exactly one slot.
//!
//! Every load is tagged with a generation. Completions belonging to an older
//! generation are dropped, so a slow response from a superseded load can never
//! overwrite newer data or end the newer load's loading phase.

use std::sync::Arc;

use freshly_core::{Customer, DashboardStat, Order, Product, ShopProfile, Tab, UnknownTab};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::config::DashboardConfig;
use crate::store_api::{DataGateway, TransportError};

/// Number of gateway calls issued per load.
pub const RESOURCE_COUNT: usize = 5;

/// A resource loaded into the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Stats,
    Orders,
    Products,
    Customers,
    ShopProfile,
}

impl Resource {
    /// Lower-case name used in logs and empty-state messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::ShopProfile => "shop profile",
        }
    }

    /// Placeholder shown when the resource has nothing to display.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Stats => "No stats available",
            Self::Orders => "No orders available",
            Self::Products => "No products available",
            Self::Customers => "No customers available",
            Self::ShopProfile => "No shop profile available",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rendering-only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub active_tab: Tab,
    pub sidebar_open: bool,
    pub loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Overview,
            sidebar_open: true,
            loading: false,
        }
    }
}

/// Everything the renderer needs, cloned out of the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub view: ViewState,
    pub stats: Vec<DashboardStat>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub shop: ShopProfile,
    /// Generation of the most recently issued load (0 = never loaded).
    pub generation: u64,
}

impl DashboardSnapshot {
    /// Shop name to display, with the "No Name" fallback.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        self.shop.display_name()
    }
}

/// Ticket for one load. Obtained from [`DashboardController::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load batch does nothing until passed to run_batch"]
pub struct LoadBatch {
    generation: u64,
}

impl LoadBatch {
    /// Generation this batch was issued under.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// A successful fetch result, ready to be written into its slot.
enum SlotUpdate {
    Stats(Vec<DashboardStat>),
    Orders(Vec<Order>),
    Products(Vec<Product>),
    Customers(Vec<Customer>),
    ShopProfile(ShopProfile),
}

struct DashboardState {
    snapshot: DashboardSnapshot,
    /// Calls of the current generation that have not settled yet.
    outstanding: usize,
}

struct ControllerInner<G> {
    gateway: G,
    orders_limit: u32,
    state: RwLock<DashboardState>,
}

/// Dashboard view-state controller.
///
/// Cheap to clone; clones share state.
pub struct DashboardController<G> {
    inner: Arc<ControllerInner<G>>,
}

impl<G> Clone for DashboardController<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: DataGateway> DashboardController<G> {
    /// Create a controller in the initial state (empty, not loading).
    #[must_use]
    pub fn new(gateway: G, config: DashboardConfig) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                gateway,
                orders_limit: config.orders_limit,
                state: RwLock::new(DashboardState {
                    snapshot: DashboardSnapshot::default(),
                    outstanding: 0,
                }),
            }),
        }
    }

    /// The gateway this controller loads from.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.inner.state.read().await.snapshot.clone()
    }

    /// Current view state only.
    pub async fn view(&self) -> ViewState {
        self.inner.state.read().await.snapshot.view
    }

    /// Start a new load: bump the generation and enter the loading phase.
    ///
    /// Any batch still in flight becomes stale.
    pub async fn begin_load(&self) -> LoadBatch {
        let mut state = self.inner.state.write().await;
        Self::start_generation(&mut state)
    }

    fn start_generation(state: &mut DashboardState) -> LoadBatch {
        state.snapshot.generation += 1;
        state.snapshot.view.loading = true;
        state.outstanding = RESOURCE_COUNT;
        tracing::debug!(generation = state.snapshot.generation, "Dashboard load started");
        LoadBatch {
            generation: state.snapshot.generation,
        }
    }

    /// Issue all five gateway calls for `batch` and apply their results.
    ///
    /// Completes once every call has settled.
    #[instrument(skip(self, batch), fields(generation = batch.generation))]
    pub async fn run_batch(&self, batch: LoadBatch) {
        let gateway = &self.inner.gateway;
        let generation = batch.generation;

        tokio::join!(
            async {
                let result = gateway.fetch_stats().await.map(SlotUpdate::Stats);
                self.settle(generation, Resource::Stats, result).await;
            },
            async {
                let result = gateway
                    .fetch_orders(self.inner.orders_limit)
                    .await
                    .map(SlotUpdate::Orders);
                self.settle(generation, Resource::Orders, result).await;
            },
            async {
                let result = gateway.fetch_products().await.map(SlotUpdate::Products);
                self.settle(generation, Resource::Products, result).await;
            },
            async {
                let result = gateway.fetch_customers().await.map(SlotUpdate::Customers);
                self.settle(generation, Resource::Customers, result).await;
            },
            async {
                let result = gateway
                    .fetch_shop_profile()
                    .await
                    .map(SlotUpdate::ShopProfile);
                self.settle(generation, Resource::ShopProfile, result).await;
            },
        );
    }

    /// Load everything and wait for the batch to settle.
    pub async fn load(&self) {
        let batch = self.begin_load().await;
        self.run_batch(batch).await;
    }

    /// Reload everything. Same as [`load`](Self::load); repeating it with no
    /// backend changes yields the same state.
    pub async fn refresh(&self) {
        self.load().await;
    }

    /// Start a reload in the background.
    ///
    /// The loading phase is entered before this returns, so a render right
    /// after the call already shows the spinner.
    pub async fn spawn_refresh(&self) -> JoinHandle<()> {
        let batch = self.begin_load().await;
        let this = self.clone();
        tokio::spawn(async move { this.run_batch(batch).await })
    }

    /// Trigger the first load if none was ever issued.
    ///
    /// Returns `true` if this call started it.
    pub async fn ensure_loaded(&self) -> bool {
        let batch = {
            let mut state = self.inner.state.write().await;
            if state.snapshot.generation != 0 {
                return false;
            }
            Self::start_generation(&mut state)
        };

        let this = self.clone();
        tokio::spawn(async move { this.run_batch(batch).await });
        true
    }

    /// Switch the active tab. Unknown identifiers leave the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTab` if `id` is not one of the dashboard tabs.
    pub async fn select_tab(&self, id: &str) -> Result<Tab, UnknownTab> {
        let tab = id.parse::<Tab>().inspect_err(|err| {
            tracing::warn!(error = %err, "Ignoring tab switch");
        })?;
        self.inner.state.write().await.snapshot.view.active_tab = tab;
        Ok(tab)
    }

    /// Flip the sidebar between open and collapsed. Returns the new value.
    pub async fn toggle_sidebar(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let view = &mut state.snapshot.view;
        view.sidebar_open = !view.sidebar_open;
        view.sidebar_open
    }

    /// Apply one completed call.
    async fn settle(
        &self,
        generation: u64,
        resource: Resource,
        result: Result<SlotUpdate, TransportError>,
    ) {
        let mut state = self.inner.state.write().await;

        if state.snapshot.generation != generation {
            tracing::debug!(
                %resource,
                generation,
                current = state.snapshot.generation,
                "Discarding stale dashboard response"
            );
            return;
        }

        match result {
            Ok(update) => {
                let snapshot = &mut state.snapshot;
                match update {
                    SlotUpdate::Stats(stats) => snapshot.stats = stats,
                    SlotUpdate::Orders(orders) => snapshot.orders = orders,
                    SlotUpdate::Products(products) => snapshot.products = products,
                    SlotUpdate::Customers(customers) => snapshot.customers = customers,
                    SlotUpdate::ShopProfile(shop) => snapshot.shop = shop,
                }
            }
            Err(e) => {
                tracing::error!(%resource, error = %e, "Failed to fetch dashboard data");
            }
        }

        state.outstanding = state.outstanding.saturating_sub(1);
        if state.outstanding == 0 {
            state.snapshot.view.loading = false;
            tracing::debug!(generation, "Dashboard load settled");
        }
    }
}
