//! Flat-file backing store: one CSV per dataset kind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::record::{FeeRecord, RawTable};
use super::schema::DatasetKind;
use crate::error::{Error, Result};

/// Parse CSV text into a raw table. Headers are trimmed; short rows are kept as-is.
pub fn parse_table(text: &str) -> std::result::Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

pub fn read_table(path: &Path) -> Result<RawTable> {
    let text = fs::read_to_string(path).map_err(|err| Error::store_read(path, err))?;
    parse_table(&text).map_err(|err| Error::store_read(path, err))
}

/// Replace the store at `path` with `records`.
///
/// The file is written next to its destination and renamed into place so readers
/// observe either the old or the new content.
pub fn write_dataset(path: &Path, kind: DatasetKind, records: &[FeeRecord]) -> Result<()> {
    write_atomically(path, kind, records).map_err(|source| Error::StoreWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomically(path: &Path, kind: DatasetKind, records: &[FeeRecord]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_path_for(path);

    let written = (|| -> io::Result<()> {
        let file = fs::File::create(&tmp)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(kind.columns().headers())?;
        for record in records {
            let int_fee = record.international_fee.to_string();
            let dom_fee = record.domestic_fee.to_string();
            writer.write_record([
                record.code.as_str(),
                record.title.as_str(),
                record.points.as_str(),
                record.faculty.as_str(),
                int_fee.as_str(),
                dom_fee.as_str(),
            ])?;
        }
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()
    })();

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store.csv".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_table_trims_headers_and_bom() {
        let table = parse_table("\u{feff}UC Code , Points\nA1,15\n").unwrap();
        assert_eq!(table.headers, vec!["UC Code", "Points"]);
        assert_eq!(table.rows, vec![vec!["A1".to_string(), "15".to_string()]]);
    }

    #[test]
    fn parse_table_accepts_ragged_rows() {
        let table = parse_table("a,b,c\n1\n1,2,3\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].len(), 1);
    }

    #[test]
    fn missing_store_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::StoreRead { .. }));
    }

    #[test]
    fn write_then_read_uses_kind_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("degrees.csv");
        let records = vec![FeeRecord {
            code: "BA".to_string(),
            title: "Bachelor of Arts".to_string(),
            faculty: "Arts".to_string(),
            points: "360".to_string(),
            international_fee: 90_000,
            domestic_fee: 21_000,
        }];
        write_dataset(&path, DatasetKind::Degrees, &records).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers[0], "Code");
        assert_eq!(table.headers[4], "Int -  Full Prog_2026");
        assert_eq!(table.rows[0][4], "90000");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.csv");
        // A non-empty directory in the way makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_dataset(&path, DatasetKind::Courses, &[]).unwrap_err();
        assert!(matches!(err, Error::StoreWrite { .. }));
        assert!(!temp_path_for(&path).exists());
        assert!(path.join("keep").exists());
    }
}
