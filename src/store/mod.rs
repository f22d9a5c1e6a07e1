//! The two ledger storage backends and the startup selection between them.
//!
//! The backend is chosen exactly once, by [connect]: if the configuration
//! names a spreadsheet and it answers a probe, the remote store is used for
//! the life of the process; otherwise everything goes to the local CSV
//! fallback. Nothing re-checks the choice per call.

mod csv_file;
mod sheet;

use std::path::Path;

pub use csv_file::CsvFileStore;
pub use sheet::SheetStore;

use crate::{Error, config::SheetConfig, ledger::Record};

/// The ledger storage backend selected at startup.
#[derive(Debug)]
pub enum LedgerStore {
    /// The remote spreadsheet.
    Sheet(SheetStore),
    /// The local CSV fallback file.
    CsvFile(CsvFileStore),
}

impl LedgerStore {
    /// Load every record in the ledger, in append order.
    ///
    /// # Errors
    /// Returns [Error::SheetApi], [Error::Io], [Error::Csv], or
    /// [Error::InvalidRow] depending on the backend and what went wrong.
    pub async fn load_all(&self) -> Result<Vec<Record>, Error> {
        match self {
            LedgerStore::Sheet(store) => store.load_all().await,
            LedgerStore::CsvFile(store) => store.load_all(),
        }
    }

    /// Append one record to the end of the ledger.
    ///
    /// # Errors
    /// Returns [Error::SheetApi], [Error::Io], or [Error::Csv] depending on
    /// the backend and what went wrong.
    pub async fn append(&self, record: &Record) -> Result<(), Error> {
        match self {
            LedgerStore::Sheet(store) => store.append(record).await,
            LedgerStore::CsvFile(store) => store.append(record),
        }
    }

    /// A human-readable description of where the ledger lives, for logs and
    /// the degraded-mode banner.
    pub fn describe(&self) -> String {
        match self {
            LedgerStore::Sheet(store) => format!("spreadsheet {}", store.spreadsheet_id()),
            LedgerStore::CsvFile(store) => format!("local file {}", store.path().display()),
        }
    }

    /// Whether the store is the local fallback rather than the configured
    /// spreadsheet.
    pub fn is_fallback(&self) -> bool {
        matches!(self, LedgerStore::CsvFile(_))
    }
}

/// Select the storage backend.
///
/// If `sheet` is configured, the spreadsheet is probed once; any failure
/// (bad credentials, network down, wrong ID) is logged and the local CSV
/// fallback at `fallback_path` is used instead. This function never fails:
/// degraded beats dead for a personal tracker.
pub async fn connect(sheet: Option<&SheetConfig>, fallback_path: &Path) -> LedgerStore {
    connect_with_base_url(sheet, fallback_path, sheet::DEFAULT_BASE_URL).await
}

pub(crate) async fn connect_with_base_url(
    sheet: Option<&SheetConfig>,
    fallback_path: &Path,
    base_url: &str,
) -> LedgerStore {
    let Some(config) = sheet else {
        tracing::warn!(
            "no spreadsheet configured, recording to {}",
            fallback_path.display()
        );
        return LedgerStore::CsvFile(CsvFileStore::new(fallback_path));
    };

    let store = SheetStore::with_base_url(config, base_url);

    match store.probe().await {
        Ok(()) => {
            tracing::info!("connected to spreadsheet {}", config.spreadsheet_id);
            LedgerStore::Sheet(store)
        }
        Err(error) => {
            tracing::warn!(
                "could not reach spreadsheet {}: {error}; falling back to {}",
                config.spreadsheet_id,
                fallback_path.display()
            );
            LedgerStore::CsvFile(CsvFileStore::new(fallback_path))
        }
    }
}
