use crate::db;
use crate::engine::aggregator;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/summary`.
///
/// Loads every stored activity and aggregates it into the dashboard view.
///
/// # Arguments
/// * `state` - Shared application state holding the database path.
///
/// # Returns
/// - `200 OK` with the `DashboardSummary` as JSON. An empty database gives a
///   zero total and empty lists.
/// - `500 Internal Server Error` with `{"detail": ...}` if the database cannot be read.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let summary = state
        .run_blocking(|_, conn| {
            let activities = db::activities::list_all(conn)?;
            Ok(aggregator::summarize(&activities))
        })
        .await;

    match summary {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.log_response("Summary failed"),
    }
}
