//! CSV ingestion endpoints.
//!
//! The provided routes are:
//! - `POST /api/upload`: Handles a multipart/form-data upload whose `file` field
//!   carries a `.csv` file. Every row is classified, its co2e computed, and the
//!   activity stored together with its emission detail. The response is an
//!   `ImportReport` listing each row as imported or skipped with a reason; the
//!   `message` field keeps the "Successfully processed N activities" wording.
//!
//! - `GET /api/imports`: Returns the upload log (filename, md5 fingerprint,
//!   processed and skipped counts), newest first.

use actix_web::web::{self, get, post};

mod file;
mod imports;

/// Registers the upload and import-log routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", post().to(file::process))
        .route("/imports", get().to(imports::process));
}
