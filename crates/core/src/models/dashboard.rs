//! Dashboard metrics and the recent-orders feed.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A `(label, value)` point of a chart series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// Payload of `GET /admin/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub customers: u64,
    pub orders: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_sales: Vec<LabeledValue>,
    pub target: f64,
    pub revenue_this_month: f64,
    pub today_revenue: f64,
    pub target_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: Vec<LabeledValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_orders: Vec<OrderRow>,
}

/// One booking in the orders feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub name: String,
    /// `Hotel`, `Destination`, `Pack` (free text on the backend).
    pub category: String,
    pub amount: f64,
    pub status: String,
    pub created_at: String,
}

/// Filter for `GET /admin/orders`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderType {
    #[default]
    All,
    Hotel,
    Destination,
    Pack,
}

impl OrderType {
    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Hotel => "HOTEL",
            Self::Destination => "DESTINATION",
            Self::Pack => "PACK",
        }
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "HOTEL" => Ok(Self::Hotel),
            "DESTINATION" => Ok(Self::Destination),
            "PACK" => Ok(Self::Pack),
            other => Err(format!(
                "Unknown order type '{other}'. Must be one of: ALL, HOTEL, DESTINATION, PACK"
            )),
        }
    }
}

/// One page of the orders feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderRow>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl OrdersPage {
    /// Total number of pages at the current page size.
    pub fn page_count(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }
}
