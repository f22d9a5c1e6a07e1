//! The local CSV fallback store.
//!
//! Used when no spreadsheet is configured or the spreadsheet cannot be
//! reached at startup. The file mirrors the worksheet layout: a header row
//! followed by one row per ledger record.

use std::path::{Path, PathBuf};

use crate::{
    Error,
    ledger::{HEADER, Record},
};

/// Stores the ledger in a local CSV file.
#[derive(Debug)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file itself is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the file, in row order.
    ///
    /// A missing file is an empty ledger, not an error.
    ///
    /// # Errors
    /// Returns [Error::Csv] if the file is not readable CSV, or
    /// [Error::InvalidRow] if a row does not parse into a record.
    pub fn load_all(&self) -> Result<Vec<Record>, Error> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let cells: Vec<String> = row.iter().map(|cell| cell.to_owned()).collect();
            // Row 1 is the header, so data row N is file row N + 1.
            records.push(Record::from_cells(&cells, index + 2)?);
        }

        Ok(records)
    }

    /// Append one record by rewriting the whole file.
    ///
    /// The existing ledger is read back, the new record is added to the end,
    /// and the file is written out again with its header. There is no
    /// partial-write protection: a crash mid-rewrite can corrupt or lose the
    /// file. Acceptable for a single-user tracker whose primary copy is the
    /// spreadsheet.
    ///
    /// # Errors
    /// Returns the errors of [CsvFileStore::load_all], or [Error::Io] /
    /// [Error::Csv] if the rewrite fails.
    pub fn append(&self, record: &Record) -> Result<(), Error> {
        let mut records = self.load_all()?;
        records.push(record.clone());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADER)?;

        for record in &records {
            writer.write_record(&record.to_cells())?;
        }

        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod csv_file_store_tests {
    use time::macros::datetime;

    use crate::{
        Error,
        ledger::{Record, compute_total},
    };

    use super::CsvFileStore;

    fn store_in(dir: &tempfile::TempDir) -> CsvFileStore {
        CsvFileStore::new(dir.path().join("ledger.csv"))
    }

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load_all().unwrap(), vec![]);
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .append(&Record::income("T", 15, None, datetime!(2026-03-01 08:00)))
            .unwrap();

        let first = store.load_all().unwrap();
        let second = store.load_all().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .append(&Record::income("Warm-up", 10, None, datetime!(2026-03-01 08:00)))
            .unwrap();
        let total_before = compute_total(&store.load_all().unwrap());

        let record = Record::income(
            "T",
            15,
            Some("after dinner".to_owned()),
            datetime!(2026-03-01 21:05),
        );
        store.append(&record).unwrap();

        let records = store.load_all().unwrap();
        assert_eq!(records.last(), Some(&record));
        assert_eq!(compute_total(&records), total_before + 15);
    }

    #[test]
    fn appends_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let when = datetime!(2026-03-01 08:00);

        for (item, points) in [("a", 1), ("b", 2), ("c", 3)] {
            store.append(&Record::income(item, points, None, when)).unwrap();
        }

        let records = store.load_all().unwrap();
        let names: Vec<&str> = records.iter().map(|record| record.item.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn corrupt_row_is_reported_with_its_row_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(
            &path,
            "Time,Type,Item,Points,Note\n2026-03-01 08:00,Income,T,fifteen,\n",
        )
        .unwrap();
        let store = CsvFileStore::new(&path);

        let result = store.load_all();

        assert_eq!(
            result,
            Err(Error::InvalidRow {
                row: 2,
                reason: "points \"fifteen\" is not an integer".to_owned()
            })
        );
    }
}
