//! What-if recomputation of a stored activity.

use crate::engine::calculator::{self, QuantityError};
use crate::engine::factors::EmissionFactorTable;
use common::model::activity::{Activity, ActivityType};
use common::model::scenario::ScenarioResponse;

/// Overrides applied on top of the stored activity. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioOverrides {
    pub quantity: Option<f64>,
    pub activity_type: Option<ActivityType>,
}

pub fn simulate(
    table: &EmissionFactorTable,
    activity: &Activity,
    overrides: ScenarioOverrides,
) -> Result<ScenarioResponse, QuantityError> {
    let quantity = overrides.quantity.unwrap_or(activity.quantity);
    let activity_type = overrides.activity_type.unwrap_or(activity.activity_type);

    let original_co2e = activity.co2e;
    let simulated_co2e = calculator::compute(table, activity_type, quantity)?.co2e;

    Ok(ScenarioResponse {
        original_co2e,
        simulated_co2e,
        difference: original_co2e - simulated_co2e,
        reduction_percentage: reduction_percentage(original_co2e, simulated_co2e),
    })
}

/// `(original - simulated) / original × 100`, or 0 when `original` is not positive.
/// Results beyond the `f64` range are clamped to `±f64::MAX`.
pub fn reduction_percentage(original: f64, simulated: f64) -> f64 {
    if original > 0.0 {
        ((original - simulated) / original * 100.0).clamp(-f64::MAX, f64::MAX)
    } else {
        0.0
    }
}
