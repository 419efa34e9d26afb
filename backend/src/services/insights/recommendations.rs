use crate::db;
use crate::engine::recommendations;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/insights`.
///
/// # Arguments
/// * `state` - Shared application state holding the database path.
///
/// # Returns
/// - `200 OK` with a JSON array of `Recommendation`, largest category first.
///   With no stored activities the array holds a single "No data available" entry.
/// - `500 Internal Server Error` with `{"detail": ...}` on a database failure.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let recommendations = state
        .run_blocking(|_, conn| {
            let activities = db::activities::list_all(conn)?;
            Ok(recommendations::recommend(&activities))
        })
        .await;

    match recommendations {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(e) => e.log_response("Recommendations failed"),
    }
}
