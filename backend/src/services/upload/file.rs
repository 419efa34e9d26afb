use crate::error::{ApiError, Result};
use crate::ingest::{self, Upload};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::model::import::ImportReport;
use futures_util::StreamExt;

/// HTTP handler wrapper that converts the import result into an `HttpResponse`.
///
/// # Arguments
/// * `state` - Shared application state (classifier, factor table, upload limit).
/// * `payload` - The multipart body; its `file` field carries the CSV.
///
/// # Returns
/// - `200 OK` with the `ImportReport` as JSON.
/// - `400 Bad Request` with `{"detail": ...}` for a non-CSV filename, an upload
///   over the size limit or bytes that are not UTF-8.
/// - `500 Internal Server Error` when the import cannot be written.
pub(crate) async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match upload_activities(&state, payload).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => e.log_response("Upload failed"),
    }
}

async fn upload_activities(state: &AppState, payload: Multipart) -> Result<ImportReport> {
    let upload = read_csv_field(payload, state.max_upload_bytes).await?;
    let today = Utc::now().date_naive();

    state
        .run_blocking(move |state, conn| {
            ingest::import_csv(conn, &upload, &state.classifier, &state.factors, today)
        })
        .await
}

/// Reads the `file` field of the multipart body into memory.
async fn read_csv_field(mut payload: Multipart, max_bytes: usize) -> Result<Upload> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::Multipart(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApiError::InvalidInput(
                "Invalid file type. Please upload a CSV.".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::Multipart(e.to_string()))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ApiError::InvalidInput(format!(
                    "Upload exceeds the limit of {} bytes",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Upload { filename, bytes });
    }

    Err(ApiError::InvalidInput("Missing file".to_string()))
}
