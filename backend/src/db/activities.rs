use crate::error::Result;
use crate::ingest::row::PreparedRow;
use common::model::activity::{Activity, ActivityType};
use common::model::emission::EmissionDetail;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ACTIVITY_COLUMNS: &str =
    "id, description, quantity, unit, date, activity_type, co2e, confidence_score";

fn map_activity(row: &Row<'_>) -> rusqlite::Result<Activity> {
    let label: String = row.get(5)?;
    let activity_type = label
        .parse::<ActivityType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Activity {
        id: row.get(0)?,
        description: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        date: row.get(4)?,
        activity_type,
        co2e: row.get(6)?,
        confidence_score: row.get(7)?,
    })
}

/// Inserts an activity and its emission detail, returning the new activity id.
///
/// Both statements must run inside the same transaction or savepoint; the
/// caller decides whether to commit.
pub fn insert_with_detail(conn: &Connection, prepared: &PreparedRow) -> Result<i64> {
    let calc = &prepared.calculation;
    conn.execute(
        "INSERT INTO activities (description, quantity, unit, date, activity_type, co2e, confidence_score)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            prepared.description,
            prepared.quantity,
            prepared.unit,
            prepared.date,
            prepared.activity_type.as_str(),
            calc.co2e,
            calc.confidence_score,
        ],
    )?;
    let activity_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO emission_details
            (activity_id, emission_factor, factor_source, formula, calculation_notes, unit_applied)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            activity_id,
            calc.emission_factor,
            calc.factor_source,
            calc.formula,
            prepared.calculation_notes(),
            calc.unit_applied,
        ],
    )?;

    Ok(activity_id)
}

/// All activities in insertion order.
pub fn list_all(conn: &Connection) -> Result<Vec<Activity>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM activities ORDER BY id", ACTIVITY_COLUMNS))?;
    let activities = stmt
        .query_map([], map_activity)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(activities)
}

/// All activities, most recent date first. Same-day activities are listed
/// newest insert first.
pub fn list_by_date_desc(conn: &Connection) -> Result<Vec<Activity>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM activities ORDER BY date DESC, id DESC",
        ACTIVITY_COLUMNS
    ))?;
    let activities = stmt
        .query_map([], map_activity)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(activities)
}

pub fn find(conn: &Connection, id: i64) -> Result<Option<Activity>> {
    let activity = conn
        .query_row(
            &format!("SELECT {} FROM activities WHERE id = ?1", ACTIVITY_COLUMNS),
            params![id],
            map_activity,
        )
        .optional()?;
    Ok(activity)
}

pub fn find_detail(conn: &Connection, activity_id: i64) -> Result<Option<EmissionDetail>> {
    let detail = conn
        .query_row(
            "SELECT activity_id, emission_factor, factor_source, formula, calculation_notes, unit_applied
             FROM emission_details WHERE activity_id = ?1",
            params![activity_id],
            |row| {
                Ok(EmissionDetail {
                    activity_id: row.get(0)?,
                    emission_factor: row.get(1)?,
                    factor_source: row.get(2)?,
                    formula: row.get(3)?,
                    calculation_notes: row.get(4)?,
                    unit_applied: row.get(5)?,
                })
            },
        )
        .optional()?;
    Ok(detail)
}
