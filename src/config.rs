//! TOML application configuration.
//!
//! Everything the server needs beyond its CLI arguments lives in one file:
//! the owner display name, the timezone used for timestamps, the optional
//! spreadsheet and push-notification credentials, and the task/reward
//! catalog. A missing file is not an error; the built-in defaults give a
//! fully working app on the local CSV fallback.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, catalog::Catalog};

/// Credentials and addressing for the remote spreadsheet.
///
/// The access token is expected to be minted externally (a service-account
/// flow or `gcloud auth print-access-token`); this app only consumes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetConfig {
    /// The spreadsheet ID from the sheet URL.
    pub spreadsheet_id: String,
    /// The worksheet (tab) holding the ledger.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    /// OAuth bearer token with spreadsheet scope.
    pub access_token: String,
}

fn default_worksheet() -> String {
    "Sheet1".to_owned()
}

/// Addressing for the push-notification endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PushConfig {
    /// The endpoint URL messages are POSTed to.
    pub url: String,
    /// The application token identifying this app to the push service.
    pub token: String,
    /// The recipient identifiers to deliver to.
    pub recipients: Vec<String>,
}

/// The application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Display name shown in the page title.
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Canonical timezone name used to stamp ledger entries, e.g.
    /// "Asia/Shanghai".
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Remote spreadsheet credentials. Absent means local-only mode.
    #[serde(default)]
    pub sheet: Option<SheetConfig>,
    /// Push-notification credentials. Absent disables notifications.
    #[serde(default)]
    pub push: Option<PushConfig>,
    /// The task and reward catalog.
    #[serde(default)]
    pub catalog: Catalog,
}

fn default_owner() -> String {
    "Scholar".to_owned()
}

fn default_timezone() -> String {
    "Etc/UTC".to_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            timezone: default_timezone(),
            sheet: None,
            push: None,
            catalog: Catalog::default(),
        }
    }
}

/// Load the configuration from `path`.
///
/// A missing file yields the defaults. A file that exists but cannot be read
/// or parsed is a startup error; running with silently-wrong credentials
/// would strand the user on the fallback without telling them why.
///
/// # Errors
/// Returns [Error::InvalidConfig] if the file cannot be read, is not valid
/// TOML, or fails [Catalog::validate].
pub fn load_config(path: &Path) -> Result<AppConfig, Error> {
    if !path.exists() {
        tracing::info!(
            "no config file at {}, using the built-in defaults",
            path.display()
        );
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .map_err(|error| Error::InvalidConfig(format!("could not read {}: {error}", path.display())))?;

    let config: AppConfig = toml::from_str(&text)
        .map_err(|error| Error::InvalidConfig(format!("could not parse {}: {error}", path.display())))?;

    config.catalog.validate()?;

    Ok(config)
}
