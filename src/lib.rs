//! Studybank is a small web app for turning study sessions into points and
//! points into treats.
//!
//! Tasks earn points, rewards spend them, and every change is appended to a
//! ledger kept in a Google Sheet (or a local CSV file when the sheet is not
//! reachable). The app directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod catalog;
mod config;
mod earn;
mod endpoints;
mod history;
mod html;
mod ledger;
mod navigation;
mod not_found;
mod notify;
mod routing;
mod spend;
mod store;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use catalog::Catalog;
pub use config::{AppConfig, load_config};
pub use notify::Notifier;
pub use routing::build_router;
pub use store::{LedgerStore, connect};

use crate::{alert::alert_error, html::error_view};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The remote spreadsheet could not be reached or rejected the request.
    ///
    /// At startup this triggers the fall back to the local CSV file. After
    /// startup it means the sheet went away mid-session.
    #[error("spreadsheet request failed: {0}")]
    SheetApi(String),

    /// A row in the backing store could not be parsed into a ledger record.
    #[error("could not parse ledger row {row}: {reason}")]
    InvalidRow {
        /// The 1-based row number in the backing store, header included.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// Reading or writing the local fallback file failed.
    #[error("ledger file error: {0}")]
    Io(String),

    /// The local fallback file contained CSV that the reader rejected.
    #[error("ledger file is not valid CSV: {0}")]
    Csv(String),

    /// A task name was submitted that is not in the catalog.
    #[error("\"{0}\" is not a known task")]
    UnknownTask(String),

    /// A reward name was submitted that is not in the catalog.
    #[error("\"{0}\" is not a known reward")]
    UnknownReward(String),

    /// A redemption was attempted with fewer points than the reward costs.
    #[error("not enough points: the reward costs {cost} but the balance is {total}")]
    InsufficientPoints {
        /// The cost of the requested reward.
        cost: i64,
        /// The balance at the time of the attempt.
        total: i64,
    },
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::SheetApi(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // The details of these errors are not intended for the client; the
        // log line is the place to look.
        tracing::error!("An unexpected error occurred: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view(
                "Server Error",
                "500",
                "Sorry, something went wrong.",
                "Try again later or check the server logs.",
            ),
        )
            .into_response()
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InsufficientPoints { cost, total } => (
                StatusCode::BAD_REQUEST,
                alert_error(
                    "Not enough points",
                    &format!("This reward costs {cost} points but you only have {total}."),
                ),
            )
                .into_response(),
            Error::UnknownTask(name) => (
                StatusCode::BAD_REQUEST,
                alert_error(
                    "Unknown task",
                    &format!("\"{name}\" is not in the task list. Try reloading the page."),
                ),
            )
                .into_response(),
            Error::UnknownReward(name) => (
                StatusCode::BAD_REQUEST,
                alert_error(
                    "Unknown reward",
                    &format!("\"{name}\" is not in the reward list. Try reloading the page."),
                ),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    alert_error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}
