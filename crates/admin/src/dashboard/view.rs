//! Tab rendering.
//!
//! [`TabView::from_snapshot`] is a pure mapping from controller state to what
//! the main panel shows; [`TabView::render`] turns that into HTML via the
//! per-tab askama partials under `templates/dashboard/`.

use askama::Template;
use freshly_core::{Customer, DashboardStat, Order, Product, Tab};

use super::controller::{DashboardSnapshot, Resource};

/// Icon class for a stat card, by the backend's symbolic icon name.
#[must_use]
pub fn stat_icon_class(icon: &str) -> &'static str {
    match icon.trim().to_ascii_lowercase().as_str() {
        "shops" | "shop" | "store" => "ph ph-storefront",
        "orders" | "order" | "pending" => "ph ph-shopping-cart",
        "revenue" | "sales" | "money" => "ph ph-currency-dollar",
        "products" | "product" | "inventory" => "ph ph-package",
        "customers" | "customer" | "users" => "ph ph-users",
        _ => "ph ph-chart-bar",
    }
}

/// Rows of one section, with the placeholder used when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    rows: Vec<T>,
    empty_message: &'static str,
}

impl<T> Section<T> {
    fn new<S>(source: &[S], resource: Resource) -> Self
    where
        T: for<'a> From<&'a S>,
    {
        Self {
            rows: source.iter().map(T::from).collect(),
            empty_message: resource.empty_message(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        self.empty_message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCardView {
    pub label: String,
    pub value: String,
    pub color_class: String,
    pub icon_class: &'static str,
}

impl From<&DashboardStat> for StatCardView {
    fn from(stat: &DashboardStat) -> Self {
        Self {
            label: stat.label.clone(),
            value: stat.value.to_string(),
            color_class: stat.color_class.clone(),
            icon_class: stat_icon_class(&stat.icon),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRowView {
    pub order_id: String,
    pub customer_name: String,
    pub amount: String,
    pub status: String,
    pub badge_class: &'static str,
    pub placed_on: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            customer_name: order.customer_name.clone(),
            amount: order.amount.to_string(),
            status: order.status.label().to_string(),
            badge_class: order.status.tone().css_class(),
            placed_on: format_date(order.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowView {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: String,
    pub stock: i64,
    pub out_of_stock: bool,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            stock: product.stock,
            out_of_stock: product.is_out_of_stock(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRowView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_orders: i64,
    pub joined: String,
}

impl From<&Customer> for CustomerRowView {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            total_orders: customer.total_orders,
            joined: format_date(customer.created_at),
        }
    }
}

fn format_date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string())
}

/// What the main panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabView {
    /// Full-panel spinner while a load is in progress.
    Loading,
    Overview {
        stats: Section<StatCardView>,
        latest_orders: Section<OrderRowView>,
    },
    Orders(Section<OrderRowView>),
    Products(Section<ProductRowView>),
    Customers(Section<CustomerRowView>),
    Settings {
        shop_name: String,
    },
}

impl TabView {
    /// Map controller state to a panel. Loading wins over the active tab.
    #[must_use]
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        if snapshot.view.loading {
            return Self::Loading;
        }

        match snapshot.view.active_tab {
            Tab::Overview => Self::Overview {
                stats: Section::new(&snapshot.stats, Resource::Stats),
                latest_orders: Section::new(&snapshot.orders, Resource::Orders),
            },
            Tab::Orders => Self::Orders(Section::new(&snapshot.orders, Resource::Orders)),
            Tab::Products => Self::Products(Section::new(&snapshot.products, Resource::Products)),
            Tab::Customers => {
                Self::Customers(Section::new(&snapshot.customers, Resource::Customers))
            }
            Tab::Settings => Self::Settings {
                shop_name: snapshot.shop_name().to_string(),
            },
        }
    }

    /// Render the panel's HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns the askama error if a partial fails to render.
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Loading => LoadingPanel.render(),
            Self::Overview {
                stats,
                latest_orders,
            } => OverviewPanel {
                stats,
                orders: latest_orders,
            }
            .render(),
            Self::Orders(orders) => OrdersPanel { orders }.render(),
            Self::Products(products) => ProductsPanel { products }.render(),
            Self::Customers(customers) => CustomersPanel { customers }.render(),
            Self::Settings { shop_name } => SettingsPanel { shop_name }.render(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard/loading.html")]
struct LoadingPanel;

#[derive(Template)]
#[template(path = "dashboard/overview.html")]
struct OverviewPanel<'a> {
    stats: &'a Section<StatCardView>,
    orders: &'a Section<OrderRowView>,
}

#[derive(Template)]
#[template(path = "dashboard/orders.html")]
struct OrdersPanel<'a> {
    orders: &'a Section<OrderRowView>,
}

#[derive(Template)]
#[template(path = "dashboard/products.html")]
struct ProductsPanel<'a> {
    products: &'a Section<ProductRowView>,
}

#[derive(Template)]
#[template(path = "dashboard/customers.html")]
struct CustomersPanel<'a> {
    customers: &'a Section<CustomerRowView>,
}

#[derive(Template)]
#[template(path = "dashboard/settings.html")]
struct SettingsPanel<'a> {
    shop_name: &'a str,
}
