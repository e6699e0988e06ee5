use serde::{Deserialize, Serialize};

use super::schema::DatasetKind;

/// Untyped CSV content: header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One course or degree with cleaned fees (whole currency units).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub code: String,
    pub title: String,
    pub faculty: String,
    pub points: String,
    pub international_fee: u64,
    pub domestic_fee: u64,
}

/// Cleaned records of one kind plus the faculties they span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDataset {
    pub kind: DatasetKind,
    pub records: Vec<FeeRecord>,
    pub faculties: Vec<String>,
}

impl LoadedDataset {
    pub fn from_records(kind: DatasetKind, records: Vec<FeeRecord>) -> Self {
        let faculties = category_index(&records);
        LoadedDataset {
            kind,
            records,
            faculties,
        }
    }
}

/// Distinct faculties in first-seen order.
pub fn category_index(records: &[FeeRecord]) -> Vec<String> {
    let mut faculties: Vec<String> = Vec::new();
    for record in records {
        if !faculties.iter().any(|f| f == &record.faculty) {
            faculties.push(record.faculty.clone());
        }
    }
    faculties
}
