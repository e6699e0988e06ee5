//! Dataset loader: reads a store, cleans it and derives the faculty index.
//! Nothing is cached; every call re-reads the file so syncs are visible immediately.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::filter::filter;
use super::normalize::normalize;
use super::record::{FeeRecord, LoadedDataset, RawTable};
use super::schema::DatasetKind;
use super::store::{read_table, write_dataset};
use crate::error::{Result, SchemaError};

/// Normalize then filter. Filtering relies on the placeholders and zero fees
/// that normalization produces, so the order matters.
pub fn clean(table: &RawTable, kind: DatasetKind) -> std::result::Result<Vec<FeeRecord>, SchemaError> {
    Ok(filter(normalize(table, kind)?))
}

pub fn load_from_path(path: &Path, kind: DatasetKind) -> Result<LoadedDataset> {
    let table = read_table(path)?;
    let records = clean(&table, kind)?;
    debug!(
        kind = %kind,
        path = %path.display(),
        rows_read = table.len(),
        rows_kept = records.len(),
        "dataset loaded"
    );
    Ok(LoadedDataset::from_records(kind, records))
}

/// Directory holding one CSV per dataset kind.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn load(&self, kind: DatasetKind) -> Result<LoadedDataset> {
        load_from_path(&self.path_for(kind), kind)
    }

    /// Overwrite the store for `kind` with already-cleaned records.
    pub fn replace(&self, kind: DatasetKind, records: &[FeeRecord]) -> Result<()> {
        write_dataset(&self.path_for(kind), kind, records)
    }
}
