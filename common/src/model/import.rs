use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to a single CSV data row during an upload.
///
/// `row` is 1-based and counts data rows only, so the first line after the
/// header is row 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Imported { row: usize, activity_id: i64 },
    Skipped { row: usize, reason: String },
}

impl RowOutcome {
    pub fn is_imported(&self) -> bool {
        matches!(self, RowOutcome::Imported { .. })
    }
}

/// Entry of the upload log kept in the `imports` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub id: String,
    pub filename: String,
    /// md5 hex digest of the uploaded bytes. Recorded only; uploads are not deduplicated.
    pub fingerprint: String,
    pub processed: usize,
    pub skipped: usize,
    pub created_at: DateTime<Utc>,
}

/// Response of `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub import_id: String,
    pub filename: String,
    pub fingerprint: String,
    pub processed: usize,
    pub skipped: usize,
    pub message: String,
    pub rows: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn new(record: &ImportRecord, rows: Vec<RowOutcome>) -> Self {
        ImportReport {
            import_id: record.id.clone(),
            filename: record.filename.clone(),
            fingerprint: record.fingerprint.clone(),
            processed: record.processed,
            skipped: record.skipped,
            message: format!("Successfully processed {} activities", record.processed),
            rows,
        }
    }
}
