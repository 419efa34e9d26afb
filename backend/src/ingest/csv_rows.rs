//! Decoding of uploaded CSV bytes into rows keyed by normalised header name.

use crate::error::{ApiError, Result};
use csv::{ReaderBuilder, Trim};
use regex::Regex;
use std::collections::HashMap;

pub type CsvRow = HashMap<String, String>;

/// Normalises a header cell: strips a UTF-8 BOM and surrounding quotes, trims,
/// lower-cases and turns runs of whitespace or hyphens into `_`.
pub fn normalize_header(cell: &str, separator_re: &Regex) -> String {
    let cell = cell.trim_start_matches('\u{feff}').trim();
    let cell = cell
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(cell)
        .trim();
    separator_re.replace_all(&cell.to_lowercase(), "_").into_owned()
}

/// Splits `bytes` into data rows.
///
/// The whole upload is rejected when it is not UTF-8 or has no readable
/// header. A record the decoder cannot read only fails its own row, whose
/// error message is kept for the import report.
pub fn decode(bytes: &[u8]) -> Result<Vec<std::result::Result<CsvRow, String>>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ApiError::InvalidInput("CSV file is not valid UTF-8".to_string()))?;

    let separator_re =
        Regex::new(r"[\s\-]+").map_err(|e| ApiError::Internal(format!("Regex error: {}", e)))?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| normalize_header(h, &separator_re))
        .collect();

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|record| {
                    headers
                        .iter()
                        .zip(record.iter())
                        .map(|(h, v)| (h.clone(), v.to_string()))
                        .collect::<CsvRow>()
                })
                .map_err(|e| e.to_string())
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separator() -> Regex {
        Regex::new(r"[\s\-]+").unwrap()
    }

    #[test]
    fn normalizes_header_cells() {
        let re = separator();
        assert_eq!(normalize_header("\u{feff}Description", &re), "description");
        assert_eq!(normalize_header("  Quantity ", &re), "quantity");
        assert_eq!(normalize_header("\"Activity  Date\"", &re), "activity_date");
        assert_eq!(normalize_header("unit-of-measure", &re), "unit_of_measure");
    }

    #[test]
    fn decodes_rows_by_header() {
        let rows = decode(b"Description,Quantity,Unit,Date\nDelivery Truck, 100 ,km,2024-01-15\n").unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row["description"], "Delivery Truck");
        assert_eq!(row["quantity"], "100");
        assert_eq!(row["unit"], "km");
        assert_eq!(row["date"], "2024-01-15");
    }

    #[test]
    fn short_rows_leave_fields_absent() {
        let rows = decode(b"description,quantity,unit\nPaper\n").unwrap();
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row["description"], "Paper");
        assert!(!row.contains_key("quantity"));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        assert!(decode(b"description,quantity\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_utf8() {
        assert!(matches!(
            decode(&[0x64, 0x65, 0xff, 0xfe]),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
