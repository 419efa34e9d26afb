use serde::{Deserialize, Serialize};

/// Result of a what-if recomputation. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub original_co2e: f64,
    pub simulated_co2e: f64,
    /// `original_co2e - simulated_co2e`; positive means a reduction.
    pub difference: f64,
    /// Reduction relative to the original value, in percent. Zero when the
    /// original value is zero.
    pub reduction_percentage: f64,
}
