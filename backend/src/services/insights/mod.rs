//! Recommendation endpoints.
//!
//! - `GET /api/insights`: rule-based recommendations ranked by category share.
//! - `POST /api/insights/ai`: a templated markdown narrative of the current
//!   footprint. The text is generated locally from category totals and the
//!   monthly trend; no language model is called.

mod narrative;
mod recommendations;

use actix_web::web::{self, get, post};

/// Registers the `/insights` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/insights")
            .route("", get().to(recommendations::process))
            .route("/ai", post().to(narrative::process)),
    );
}
