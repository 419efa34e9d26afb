use crate::db;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::emission::ActivityExplanation;

/// Handler for `GET /api/explain/{activity_id}`.
///
/// # Arguments
/// * `state` - Shared application state holding the database path.
/// * `activity_id` - Id of the stored activity, taken from the URL path.
///
/// # Returns
/// - `200 OK` with the `ActivityExplanation` as JSON.
/// - `404 Not Found` when no activity has this id.
pub(crate) async fn process(state: web::Data<AppState>, activity_id: web::Path<i64>) -> impl Responder {
    match explain_activity(&state, activity_id.into_inner()).await {
        Ok(explanation) => HttpResponse::Ok().json(explanation),
        Err(e) => e.log_response("Explain failed"),
    }
}

async fn explain_activity(state: &AppState, activity_id: i64) -> Result<ActivityExplanation> {
    state
        .run_blocking(move |_, conn| {
            let activity = db::activities::find(conn, activity_id)?
                .ok_or_else(|| ApiError::NotFound("Activity not found".to_string()))?;
            let details = db::activities::find_detail(conn, activity_id)?;
            Ok(ActivityExplanation::new(activity, details))
        })
        .await
}
