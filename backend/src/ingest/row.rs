//! Parsing and preparation of a single CSV row.
//!
//! Absent or blank fields take defaults; values that are present but cannot
//! be read make the row fail with a [`RowError`] naming the reason.

use crate::engine::calculator::{self, Calculation, QuantityError};
use crate::engine::classifier::Classifier;
use crate::engine::factors::EmissionFactorTable;
use crate::ingest::csv_rows::CsvRow;
use chrono::NaiveDate;
use common::model::activity::ActivityType;
use thiserror::Error;

pub const DEFAULT_DESCRIPTION: &str = "Unknown";
pub const DEFAULT_UNIT: &str = "items";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    #[error("negative quantity {0}")]
    NegativeQuantity(f64),

    #[error("co2e for quantity {0} is too large to represent")]
    Overflow(f64),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl From<QuantityError> for RowError {
    fn from(err: QuantityError) -> Self {
        match err {
            QuantityError::Negative(q) => RowError::NegativeQuantity(q),
            QuantityError::NonFinite => RowError::InvalidQuantity("non-finite".to_string()),
            QuantityError::Overflow(q) => RowError::Overflow(q),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub date: NaiveDate,
}

/// A row ready to be stored: parsed fields, classification and calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub calculation: Calculation,
}

impl PreparedRow {
    pub fn calculation_notes(&self) -> String {
        format!("Calculated for {} {}", self.quantity, self.unit)
    }
}

fn field<'a>(row: &'a CsvRow, name: &str) -> Option<&'a str> {
    row.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

pub fn parse_row(row: &CsvRow, today: NaiveDate) -> Result<ParsedRow, RowError> {
    let description = field(row, "description").unwrap_or(DEFAULT_DESCRIPTION).to_string();
    let unit = field(row, "unit").unwrap_or(DEFAULT_UNIT).to_string();

    let quantity = match field(row, "quantity") {
        Some(raw) => {
            let value: f64 = raw
                .parse()
                .map_err(|_| RowError::InvalidQuantity(raw.to_string()))?;
            calculator::validate_quantity(value).map_err(|e| match e {
                QuantityError::NonFinite => RowError::InvalidQuantity(raw.to_string()),
                other => RowError::from(other),
            })?
        }
        None => 0.0,
    };

    let date = match field(row, "date") {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| RowError::InvalidDate(raw.to_string()))?,
        None => today,
    };

    Ok(ParsedRow {
        description,
        quantity,
        unit,
        date,
    })
}

/// Parses, classifies and computes one row.
pub fn prepare_row(
    row: &CsvRow,
    today: NaiveDate,
    classifier: &Classifier,
    factors: &EmissionFactorTable,
) -> Result<PreparedRow, RowError> {
    let parsed = parse_row(row, today)?;
    let activity_type = classifier.classify(&parsed.description);
    let calculation = calculator::compute(factors, activity_type, parsed.quantity)?;

    Ok(PreparedRow {
        description: parsed.description,
        quantity: parsed.quantity,
        unit: parsed.unit,
        date: parsed.date,
        activity_type,
        calculation,
    })
}
