//! Dashboard statistics and shop profile.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::StatId;

/// Shop name shown when the backend has none on record.
pub const NO_SHOP_NAME: &str = "No Name";

/// Value of a dashboard stat card.
///
/// The backend sends either a number (`56`) or preformatted text (`"$4,230"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(Decimal),
    Text(String),
}

impl Default for StatValue {
    fn default() -> Self {
        Self::Number(Decimal::ZERO)
    }
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n.normalize()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single stat card on the overview tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStat {
    /// Backend record ID, when the stat is stored.
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<StatId>,
    /// Card title, e.g. "Pending Orders".
    pub label: String,
    /// Displayed value.
    pub value: StatValue,
    /// Accent class for the value text.
    pub color_class: String,
    /// Symbolic icon name, e.g. "orders".
    pub icon: String,
}

/// Shop profile returned by `/api/shop/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopProfile {
    #[serde(default)]
    pub name: Option<String>,
}

impl ShopProfile {
    /// Create a profile with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Name to display, falling back to [`NO_SHOP_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_SHOP_NAME)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_value_number_or_text() {
        let stats: Vec<DashboardStat> = serde_json::from_str(
            r#"[
                {"label": "Total Shops", "value": 56, "colorClass": "text-green-600", "icon": "shops"},
                {"label": "Revenue", "value": "$4,230", "colorClass": "text-green-600", "icon": "revenue"}
            ]"#,
        )
        .unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].value.to_string(), "56");
        assert_eq!(stats[1].value, StatValue::Text("$4,230".to_string()));
        assert_eq!(stats[1].color_class, "text-green-600");
    }

    #[test]
    fn test_stat_missing_fields_default() {
        let stat: DashboardStat = serde_json::from_str(r#"{"label": "Orders"}"#).unwrap();
        assert_eq!(stat.label, "Orders");
        assert_eq!(stat.value.to_string(), "0");
        assert!(stat.icon.is_empty());
    }

    #[test]
    fn test_shop_profile_display_name() {
        assert_eq!(ShopProfile::new("Fresh Mart").display_name(), "Fresh Mart");
        assert_eq!(ShopProfile::default().display_name(), NO_SHOP_NAME);
        assert_eq!(ShopProfile::new("  ").display_name(), NO_SHOP_NAME);

        let profile: ShopProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.display_name(), "No Name");
    }
}
