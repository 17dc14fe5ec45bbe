//! Order status and its display classification.
//!
//! The backend reports order status as free text. Three values are known;
//! anything else is preserved verbatim so it can still be shown.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the shop.
    Pending,
    /// Being prepared or in transit.
    Processing,
    /// Handed over to the customer.
    Delivered,
    /// Any status the panel does not know about.
    Other(String),
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl OrderStatus {
    /// Parse a status string. Never fails: unknown values become `Other`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("pending") {
            Self::Pending
        } else if trimmed.eq_ignore_ascii_case("processing") {
            Self::Processing
        } else if trimmed.eq_ignore_ascii_case("delivered") {
            Self::Delivered
        } else {
            Self::Other(raw.to_string())
        }
    }

    /// Label shown in the status badge.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Delivered => "Delivered",
            Self::Other(raw) if raw.trim().is_empty() => "Unknown",
            Self::Other(raw) => raw,
        }
    }

    /// Badge tone for this status.
    #[must_use]
    pub const fn tone(&self) -> BadgeTone {
        match self {
            Self::Delivered => BadgeTone::Success,
            Self::Processing => BadgeTone::Warning,
            Self::Pending => BadgeTone::Danger,
            Self::Other(_) => BadgeTone::Neutral,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl BadgeTone {
    /// CSS class applied to the badge element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "badge badge-success",
            Self::Warning => "badge badge-warning",
            Self::Danger => "badge badge-danger",
            Self::Neutral => "badge badge-neutral",
        }
    }
}

impl std::fmt::Display for BadgeTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_map_to_tones() {
        assert_eq!(OrderStatus::Delivered.tone(), BadgeTone::Success);
        assert_eq!(OrderStatus::Processing.tone(), BadgeTone::Warning);
        assert_eq!(OrderStatus::Pending.tone(), BadgeTone::Danger);
    }

    #[test]
    fn test_unknown_status_is_neutral() {
        let status = OrderStatus::parse("Unknown");
        assert_eq!(status, OrderStatus::Other("Unknown".to_string()));
        assert_eq!(status.tone(), BadgeTone::Neutral);
        assert_eq!(status.label(), "Unknown");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("delivered"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::parse(" PENDING "), OrderStatus::Pending);
    }

    #[test]
    fn test_empty_status_label() {
        assert_eq!(OrderStatus::parse("").label(), "Unknown");
        assert_eq!(OrderStatus::default().tone(), BadgeTone::Neutral);
    }

    #[test]
    fn test_deserialize_any_string() {
        let status: OrderStatus = serde_json::from_str(r#""Cancelled""#).unwrap();
        assert_eq!(status.label(), "Cancelled");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Cancelled""#);

        let status: OrderStatus = serde_json::from_str(r#""Processing""#).unwrap();
        assert_eq!(status, OrderStatus::Processing);
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(BadgeTone::Success.css_class(), "badge badge-success");
        assert_eq!(BadgeTone::Neutral.css_class(), "badge badge-neutral");
    }
}
