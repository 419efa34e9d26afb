use crate::db;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Handler for `GET /api/imports`.
///
/// # Arguments
/// * `state` - Shared application state holding the database path.
///
/// # Returns
/// - `200 OK` with the upload log as a JSON array of `ImportRecord`, newest first.
/// - `500 Internal Server Error` with `{"detail": ...}` on a database failure.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    match state.run_blocking(|_, conn| db::imports::list(conn)).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => e.log_response("Listing imports failed"),
    }
}
