use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emissions category an activity is classified into.
///
/// The snake_case label (`"supply_chain"`) is used both on the wire and in the
/// `activities.activity_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Transport,
    Energy,
    SupplyChain,
    Waste,
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Transport,
        ActivityType::Energy,
        ActivityType::SupplyChain,
        ActivityType::Waste,
        ActivityType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Transport => "transport",
            ActivityType::Energy => "energy",
            ActivityType::SupplyChain => "supply_chain",
            ActivityType::Waste => "waste",
            ActivityType::Other => "other",
        }
    }

    /// Parses a category label case-insensitively. Spaces and hyphens are read as
    /// underscores, and `general` is accepted as an alias of `other`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        if normalized == "general" {
            return Some(ActivityType::Other);
        }
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivityType(pub String);

impl fmt::Display for UnknownActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity type '{}'", self.0)
    }
}

impl std::error::Error for UnknownActivityType {}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}

/// Coarse rating of a confidence score, as shown next to each activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            ConfidenceLevel::High
        } else if score >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// A persisted activity record. Created once per imported CSV row and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    /// Estimated emissions in kgCO2e.
    pub co2e: f64,
    /// Quality of the emission factor applied, between 0 and 1.
    pub confidence_score: f64,
}

/// An activity as listed by `GET /api/activities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub confidence_level: ConfidenceLevel,
}

impl From<Activity> for ActivityView {
    fn from(activity: Activity) -> Self {
        let confidence_level = ConfidenceLevel::from_score(activity.confidence_score);
        ActivityView {
            activity,
            confidence_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_leniently() {
        assert_eq!(ActivityType::from_label("Supply Chain"), Some(ActivityType::SupplyChain));
        assert_eq!(ActivityType::from_label(" TRANSPORT "), Some(ActivityType::Transport));
        assert_eq!(ActivityType::from_label("supply-chain"), Some(ActivityType::SupplyChain));
        assert_eq!(ActivityType::from_label("general"), Some(ActivityType::Other));
        assert_eq!(ActivityType::from_label("aviation"), None);
        assert!("".parse::<ActivityType>().is_err());
    }

    #[test]
    fn labels_round_trip_through_display() {
        for activity_type in ActivityType::ALL {
            assert_eq!(activity_type.to_string().parse::<ActivityType>(), Ok(activity_type));
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ActivityType::SupplyChain).unwrap();
        assert_eq!(json, "\"supply_chain\"");
    }

    #[test]
    fn confidence_levels_follow_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(1.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.85), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.7), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.4), ConfidenceLevel::Low);
    }

    #[test]
    fn activity_view_flattens_activity_fields() {
        let activity = Activity {
            id: 7,
            description: "Delivery Truck".to_string(),
            quantity: 100.0,
            unit: "km".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            activity_type: ActivityType::Transport,
            co2e: 21.0,
            confidence_score: 0.9,
        };
        let value = serde_json::to_value(ActivityView::from(activity)).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["activity_type"], "transport");
        assert_eq!(value["confidence_level"], "High");
    }
}
