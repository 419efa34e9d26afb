//! What-if scenarios.
//!
//! `POST /api/scenario` recomputes one stored activity with an overridden
//! quantity and/or activity type and reports the difference. Nothing is written
//! back to the database.

mod simulate;

use actix_web::web::{self, post};

/// Registers the scenario route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/scenario", post().to(simulate::process));
}
