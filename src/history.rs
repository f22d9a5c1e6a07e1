//! The ledger page: the full transaction table, newest first.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{PAGE_CONTAINER_STYLE, TABLE_STYLE, base, fallback_banner, format_points, points_class, points_metric},
    ledger::{Record, compute_total},
    navigation::NavBar,
    store::LedgerStore,
};

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct HistoryState {
    /// Display name shown in the page title.
    pub owner: String,
    /// The ledger storage backend.
    pub store: Arc<LedgerStore>,
}

impl FromRef<AppState> for HistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            owner: state.owner.clone(),
            store: state.store.clone(),
        }
    }
}

/// Render the ledger page.
pub async fn get_ledger_page(State(state): State<HistoryState>) -> Response {
    let mut records = match state.store.load_all().await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("could not load the ledger: {error}");
            return error.into_response();
        }
    };

    let total = compute_total(&records);
    // Newest entries first.
    records.reverse();

    ledger_view(
        &state.owner,
        total,
        &records,
        &fallback_banner(&state.store),
    )
    .into_response()
}

fn ledger_view(owner: &str, total: i64, records: &[Record], banner: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW).into_html();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            (nav_bar)
            (banner)
            (points_metric(owner, total))

            @if records.is_empty() {
                p class="empty-state" { "No entries yet. Go earn some points!" }
            } @else {
                table class=(TABLE_STYLE)
                {
                    thead
                    {
                        tr
                        {
                            th { "Time" }
                            th { "Type" }
                            th { "Item" }
                            th { "Points" }
                            th { "Note" }
                        }
                    }

                    tbody
                    {
                        @for record in records {
                            (ledger_row(record))
                        }
                    }
                }
            }
        }
    };

    base("Ledger", &content)
}

fn ledger_row(record: &Record) -> Markup {
    let cells = record.to_cells();

    html! {
        tr
        {
            td { (cells[0]) }
            td { (record.kind.as_str()) }
            td { (record.item) }
            td class=(points_class(record.points)) { (format_points(record.points)) }
            td { (record.note.as_deref().unwrap_or("")) }
        }
    }
}
