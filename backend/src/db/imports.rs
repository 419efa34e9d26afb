use crate::error::Result;
use common::model::import::ImportRecord;
use rusqlite::{params, Connection};

pub fn insert(conn: &Connection, record: &ImportRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO imports (id, filename, fingerprint, processed, skipped, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.id,
            record.filename,
            record.fingerprint,
            record.processed as i64,
            record.skipped as i64,
            record.created_at,
        ],
    )?;
    Ok(())
}

/// Upload log, newest first.
pub fn list(conn: &Connection) -> Result<Vec<ImportRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, filename, fingerprint, processed, skipped, created_at
         FROM imports ORDER BY created_at DESC, rowid DESC",
    )?;
    let records = stmt
        .query_map([], |row| {
            Ok(ImportRecord {
                id: row.get(0)?,
                filename: row.get(1)?,
                fingerprint: row.get(2)?,
                processed: row.get::<_, i64>(3)? as usize,
                skipped: row.get::<_, i64>(4)? as usize,
                created_at: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}
