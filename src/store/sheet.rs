//! The remote spreadsheet store, backed by the Google Sheets values API.
//!
//! Only two operations are needed: fetch all data rows and append one row.
//! Both go through the `values` endpoints with a bearer token supplied by
//! the configuration; this module never mints or refreshes credentials.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::{Error, config::SheetConfig, ledger::Record};

pub(crate) const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stores the ledger in one worksheet of a Google Sheet.
///
/// Worksheet names are used verbatim in request paths, so stick to plain
/// names like `Sheet1`.
#[derive(Debug)]
pub struct SheetStore {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    access_token: String,
}

/// The response body of a values `GET`. `values` is absent when the range is
/// empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl SheetStore {
    /// Create a store for the spreadsheet named in `config`.
    pub fn new(config: &SheetConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub(crate) fn with_base_url(config: &SheetConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            worksheet: config.worksheet.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// The ID of the backing spreadsheet.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}!{range}",
            self.base_url, self.spreadsheet_id, self.worksheet
        )
    }

    /// Check that the spreadsheet answers at all by reading the header row.
    ///
    /// # Errors
    /// Returns [Error::SheetApi] if the request fails or the sheet rejects
    /// the credentials.
    pub async fn probe(&self) -> Result<(), Error> {
        let url = self.values_url("A1:E1");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::SheetApi(format!(
                "probe of {url} returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch every data row (everything below the header) and parse each
    /// into a [Record].
    ///
    /// # Errors
    /// Returns [Error::SheetApi] on transport or API failures, or
    /// [Error::InvalidRow] if a fetched row does not parse.
    pub async fn load_all(&self) -> Result<Vec<Record>, Error> {
        let url = self.values_url("A2:E");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::SheetApi(format!(
                "GET {url} returned {}",
                response.status()
            )));
        }

        let body: ValueRange = response.json().await?;

        body.values
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                // The fetched range starts below the header, at sheet row 2.
                Record::from_cells(&cells, index + 2)
            })
            .collect()
    }

    /// Append one record as a new row after the current last row.
    ///
    /// # Errors
    /// Returns [Error::SheetApi] on transport or API failures.
    pub async fn append(&self, record: &Record) -> Result<(), Error> {
        let url = self.append_url();
        let body = json!({ "values": [record.to_cells()] });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::SheetApi(format!(
                "append to {url} returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn append_url(&self) -> String {
        format!("{}:append?valueInputOption=RAW", self.values_url("A1:E1"))
    }
}

/// The values API returns formatted cells as strings, but untyped cells can
/// come back as bare JSON numbers.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
