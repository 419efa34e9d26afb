use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Request payload for `POST /api/scenario`.
/// Omitted overrides keep the activity's stored quantity or type.
pub struct ScenarioRequest {
    pub activity_id: i64,
    #[serde(default)]
    pub new_quantity: Option<f64>,
    #[serde(default)]
    pub new_type: Option<String>,
}
