use crate::model::activity::{Activity, ConfidenceLevel};
use serde::{Deserialize, Serialize};

/// How the co2e value of one activity was derived.
///
/// Exactly one detail row exists per activity. It is written in the same
/// transaction as the activity and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionDetail {
    pub activity_id: i64,
    /// Multiplier in kgCO2e per `unit_applied`.
    pub emission_factor: f64,
    pub factor_source: String,
    pub formula: String,
    pub calculation_notes: String,
    pub unit_applied: String,
}

/// Response of `GET /api/explain/{id}`: the activity plus its calculation detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityExplanation {
    #[serde(flatten)]
    pub activity: Activity,
    pub confidence_level: ConfidenceLevel,
    pub details: Option<EmissionDetail>,
}

impl ActivityExplanation {
    pub fn new(activity: Activity, details: Option<EmissionDetail>) -> Self {
        let confidence_level = ConfidenceLevel::from_score(activity.confidence_score);
        ActivityExplanation {
            activity,
            confidence_level,
            details,
        }
    }
}
