use crate::db;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::activity::ActivityView;

/// Handler for `GET /api/activities`.
///
/// # Arguments
/// * `state` - Shared application state holding the database path.
///
/// # Returns
/// - `200 OK` with every activity as an `ActivityView` (most recent date first).
/// - `500 Internal Server Error` with `{"detail": ...}` on a database failure.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let activities = state
        .run_blocking(|_, conn| {
            let activities = db::activities::list_by_date_desc(conn)?;
            Ok(activities.into_iter().map(ActivityView::from).collect::<Vec<_>>())
        })
        .await;

    match activities {
        Ok(activities) => HttpResponse::Ok().json(activities),
        Err(e) => e.log_response("Listing activities failed"),
    }
}
