//! Record normalizer: turns raw CSV cells into typed fee records.
//! Fees become whole numbers, missing faculties get the default, and missing
//! identity cells get the placeholder marker so the row filter can drop them.

use super::record::{FeeRecord, RawTable};
use super::schema::{DatasetKind, DEFAULT_FACULTY, PLACEHOLDER};
use crate::error::SchemaError;

/// Normalize every row of `table` against the column map of `kind`.
pub fn normalize(table: &RawTable, kind: DatasetKind) -> Result<Vec<FeeRecord>, SchemaError> {
    let columns = kind.columns();
    let required = columns.headers();

    let missing: Vec<String> = required
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError {
            kind,
            missing,
            present: table.headers.clone(),
        });
    }

    // Presence was checked above.
    let index = |name: &str| table.column_index(name).unwrap_or_default();
    let code = index(columns.code);
    let title = index(columns.title);
    let faculty = index(columns.faculty);
    let points = index(columns.points);
    let international_fee = index(columns.international_fee);
    let domestic_fee = index(columns.domestic_fee);

    let records = table
        .rows
        .iter()
        .map(|row| {
            let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");
            FeeRecord {
                code: or_placeholder(cell(code)),
                title: cell(title).to_string(),
                faculty: faculty_or_default(cell(faculty)),
                points: or_placeholder(cell(points)),
                international_fee: parse_fee(cell(international_fee)),
                domestic_fee: parse_fee(cell(domestic_fee)),
            }
        })
        .collect();

    Ok(records)
}

/// Parse a currency cell such as `"$1,050.00"` into whole units.
///
/// Unset (`""`, `"nan"`), unparsable, negative and non-finite values become 0.
/// Fractions are truncated, never rounded.
pub fn parse_fee(raw: &str) -> u64 {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

fn faculty_or_default(value: &str) -> String {
    if value.is_empty() || value == "None" {
        DEFAULT_FACULTY.to_string()
    } else {
        value.to_string()
    }
}
