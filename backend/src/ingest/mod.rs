//! CSV import pipeline.
//!
//! ## Workflow
//!
//! 1.  **Fingerprint**: the md5 digest of the raw upload is computed. It is logged
//!     and stored in the upload log; re-uploading the same file is allowed and
//!     creates new activities.
//!
//! 2.  **Decoding**: `csv_rows::decode` splits the bytes into rows keyed by
//!     normalised header name.
//!
//! 3.  **Per-row processing**: each row is parsed, classified and computed by
//!     `row::prepare_row`, then written with its emission detail inside its own
//!     SAVEPOINT. A row that fails at any step is rolled back, logged and
//!     reported as skipped; the remaining rows still import.
//!
//! 4.  **Commit**: the upload log entry is inserted and the enclosing transaction
//!     committed, so all imported rows become visible together.

pub mod csv_rows;
pub mod row;

use crate::db;
use crate::engine::classifier::Classifier;
use crate::engine::factors::EmissionFactorTable;
use crate::error::Result;
use chrono::{NaiveDate, Utc};
use common::model::import::{ImportRecord, ImportReport, RowOutcome};
use log::{info, warn};
use row::{PreparedRow, RowError};
use rusqlite::{Connection, Transaction};

/// An uploaded CSV file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn import_csv(
    conn: &mut Connection,
    upload: &Upload,
    classifier: &Classifier,
    factors: &EmissionFactorTable,
    today: NaiveDate,
) -> Result<ImportReport> {
    let fingerprint = format!("{:x}", md5::compute(&upload.bytes));
    let rows = csv_rows::decode(&upload.bytes)?;

    let mut tx = conn.transaction()?;
    let mut outcomes = Vec::with_capacity(rows.len());

    for (index, decoded) in rows.into_iter().enumerate() {
        let row_number = index + 1;
        let prepared = decoded
            .map_err(RowError::Malformed)
            .and_then(|r| row::prepare_row(&r, today, classifier, factors));

        let outcome = match prepared {
            Ok(prepared) => match persist_row(&mut tx, &prepared) {
                Ok(activity_id) => RowOutcome::Imported {
                    row: row_number,
                    activity_id,
                },
                Err(e) => {
                    warn!("{}: row {} not stored: {}", upload.filename, row_number, e);
                    RowOutcome::Skipped {
                        row: row_number,
                        reason: format!("storage failure: {}", e),
                    }
                }
            },
            Err(reason) => {
                warn!("{}: skipping row {}: {}", upload.filename, row_number, reason);
                RowOutcome::Skipped {
                    row: row_number,
                    reason: reason.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    let processed = outcomes.iter().filter(|o| o.is_imported()).count();
    let record = ImportRecord {
        id: uuid::Uuid::new_v4().to_string(),
        filename: upload.filename.clone(),
        fingerprint,
        processed,
        skipped: outcomes.len() - processed,
        created_at: Utc::now(),
    };
    db::imports::insert(&tx, &record)?;
    tx.commit()?;

    info!(
        "Imported {} ({}): {} processed, {} skipped",
        record.filename, record.fingerprint, record.processed, record.skipped
    );
    Ok(ImportReport::new(&record, outcomes))
}

/// Writes one activity and its detail atomically.
fn persist_row(tx: &mut Transaction<'_>, prepared: &PreparedRow) -> Result<i64> {
    let sp = tx.savepoint()?;
    let activity_id = db::activities::insert_with_detail(&sp, prepared)?;
    sp.commit()?;
    Ok(activity_id)
}
