//! Dashboard tab identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Overview,
    Orders,
    Products,
    Customers,
    Settings,
}

/// Returned when a tab identifier is not one of the known tabs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dashboard tab: {0}")]
pub struct UnknownTab(pub String);

impl Tab {
    /// All tabs in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Orders,
        Self::Products,
        Self::Customers,
        Self::Settings,
    ];

    /// Identifier used in URLs and forms.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Settings => "settings",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Orders => "Orders",
            Self::Products => "Products",
            Self::Customers => "Customers",
            Self::Settings => "Settings",
        }
    }

    /// Phosphor icon class for the sidebar entry.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Overview => "ph ph-squares-four",
            Self::Orders => "ph ph-shopping-cart",
            Self::Products => "ph ph-package",
            Self::Customers => "ph ph-users",
            Self::Settings => "ph ph-gear",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}
