//! HTTP route groups. Every route lives under [`API_PATH`].

pub mod health;
pub mod insights;
pub mod reports;
pub mod scenario;
pub mod upload;

use actix_web::web;

pub const API_PATH: &str = "/api";

/// Registers every route group under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PATH)
            .configure(upload::configure_routes)
            .configure(reports::configure_routes)
            .configure(scenario::configure_routes)
            .configure(insights::configure_routes)
            .configure(health::configure_routes),
    );
}
