use crate::model::activity::ActivityType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: ActivityType,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub activity_id: i64,
    pub description: String,
    pub co2e: f64,
}

/// Total co2e of one calendar month. `date` is formatted `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub co2e: f64,
}

/// Dashboard aggregate over every stored activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_co2e: f64,
    pub category_distribution: Vec<CategoryTotal>,
    /// At most five activities, largest co2e first.
    pub hotspots: Vec<Hotspot>,
    /// Monthly buckets in ascending order.
    pub trend_data: Vec<TrendPoint>,
}
