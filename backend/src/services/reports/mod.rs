//! Read-only views over stored activities.
//!
//! ## Registered Routes:
//!
//! *   **`GET /summary`**: total co2e, per-category totals, the five largest
//!     activities and monthly trend buckets (`DashboardSummary`).
//!
//! *   **`GET /activities`**: every activity, most recent date first, each with
//!     its confidence level.
//!
//! *   **`GET /explain/{activity_id}`**: one activity with the factor, source,
//!     formula and notes used to compute it. `404` when the id is unknown.

mod activities;
mod explain;
mod summary;

use actix_web::web::{self, get};

/// Registers the summary, activity list and explanation routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/summary", get().to(summary::process))
        .route("/activities", get().to(activities::process))
        .route("/explain/{activity_id}", get().to(explain::process));
}
