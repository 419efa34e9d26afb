use crate::db;
use crate::engine::scenario::{self, ScenarioOverrides};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::activity::ActivityType;
use common::model::scenario::ScenarioResponse;
use common::requests::ScenarioRequest;
use log::debug;

/// Handler for `POST /api/scenario`.
///
/// # Arguments
/// * `state` - Shared application state with the factor table.
/// * `payload` - `ScenarioRequest` naming the activity and the overrides to apply.
///
/// # Returns
/// - `200 OK` with a `ScenarioResponse`. The stored activity is not modified.
/// - `404 Not Found` when the activity does not exist.
/// - `400 Bad Request` for a negative, non-finite or overflowing `new_quantity`.
pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<ScenarioRequest>,
) -> impl Responder {
    match simulate_scenario(&state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.log_response("Scenario failed"),
    }
}

async fn simulate_scenario(state: &AppState, req: ScenarioRequest) -> Result<ScenarioResponse> {
    // Labels without a matching type are computed with the fallback factor.
    let activity_type = req.new_type.as_deref().map(|label| {
        ActivityType::from_label(label).unwrap_or_else(|| {
            debug!("Unknown scenario type '{}', using fallback factor", label);
            ActivityType::Other
        })
    });
    let overrides = ScenarioOverrides {
        quantity: req.new_quantity,
        activity_type,
    };
    let activity_id = req.activity_id;

    state
        .run_blocking(move |state, conn| {
            let activity = db::activities::find(conn, activity_id)?
                .ok_or_else(|| ApiError::NotFound("Activity not found".to_string()))?;
            Ok(scenario::simulate(&state.factors, &activity, overrides)?)
        })
        .await
}
