//! EcoLedger backend: CSV activity ingestion, emissions estimation and reporting
//! over HTTP.
//!
//! `main.rs` only bootstraps; everything it wires together is exposed here so
//! integration tests can build the same application.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod services;
pub mod state;

use actix_web::web;

/// Registers all API routes. Expects `web::Data<AppState>` in the app data.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    services::configure(cfg);
}
