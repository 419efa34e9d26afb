use crate::db;
use crate::engine::recommendations;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `POST /api/insights/ai`.
///
/// # Arguments
/// * `state` - Shared application state holding the database path.
///
/// # Returns
/// - `200 OK` with an `InsightReport` whose `content` is the markdown narrative.
/// - `500 Internal Server Error` with `{"detail": ...}` on a database failure.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let report = state
        .run_blocking(|_, conn| {
            let activities = db::activities::list_all(conn)?;
            Ok(recommendations::narrative(&activities))
        })
        .await;

    match report {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => e.log_response("Narrative failed"),
    }
}
