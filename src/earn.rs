//! The earn-points page and the endpoint for logging completed tasks.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::alert_success,
    catalog::{Catalog, Task},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, fallback_banner, metric_value_oob, points_metric},
    ledger::{Record, compute_total},
    navigation::NavBar,
    notify::Notifier,
    store::LedgerStore,
    timezone::local_now,
};

/// The state needed for the earn page and endpoint.
#[derive(Debug, Clone)]
pub struct EarnState {
    /// Display name shown in the page title.
    pub owner: String,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
    /// The ledger storage backend.
    pub store: Arc<LedgerStore>,
    /// The task and reward catalog.
    pub catalog: Arc<Catalog>,
    /// The best-effort push notifier.
    pub notifier: Notifier,
}

impl FromRef<AppState> for EarnState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            owner: state.owner.clone(),
            local_timezone: state.local_timezone.clone(),
            store: state.store.clone(),
            catalog: state.catalog.clone(),
            notifier: state.notifier.clone(),
        }
    }
}

/// The form data for logging a completed task.
#[derive(Debug, Deserialize)]
pub struct EarnForm {
    /// The catalog name of the completed task.
    pub task: String,
}

/// Render the earn page: the balance metric and one button per task.
pub async fn get_earn_page(State(state): State<EarnState>) -> Response {
    let records = match state.store.load_all().await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("could not load the ledger: {error}");
            return error.into_response();
        }
    };

    earn_view(
        &state.owner,
        compute_total(&records),
        &state.catalog.tasks,
        &fallback_banner(&state.store),
    )
    .into_response()
}

/// Record a completed task as an income entry.
///
/// On success the ledger write has already completed when the notification
/// is dispatched, so the message can carry the new balance. The response is
/// an alert fragment plus an out-of-band update of the on-page metric.
pub async fn earn_points_endpoint(
    State(state): State<EarnState>,
    Form(form): Form<EarnForm>,
) -> Response {
    let Some(task) = state.catalog.task(&form.task) else {
        return Error::UnknownTask(form.task).into_alert_response();
    };

    let records = match state.store.load_all().await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("could not load the ledger: {error}");
            return error.into_alert_response();
        }
    };

    let record = Record::income(&task.name, task.points, None, local_now(&state.local_timezone));

    if let Err(error) = state.store.append(&record).await {
        tracing::error!("could not record task \"{}\": {error}", task.name);
        return error.into_alert_response();
    }

    let total = compute_total(&records) + task.points;

    state.notifier.dispatch(format!(
        "{} earned {} points for \"{}\". Balance: {total}.",
        state.owner, task.points, task.name
    ));

    html! {
        (alert_success(
            &format!("+{} points", task.points),
            &format!("\"{}\" is in the ledger. Balance: {total}.", task.name),
        ))
        (metric_value_oob(total))
    }
    .into_response()
}

fn earn_view(owner: &str, total: i64, tasks: &[Task], banner: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::EARN_VIEW).into_html();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            (nav_bar)
            (banner)
            (points_metric(owner, total))

            div class="task-list"
            {
                @for task in tasks {
                    form
                        hx-post=(endpoints::EARN_API)
                        hx-target="#alert-container"
                        hx-swap="innerHTML"
                        hx-target-error="#alert-container"
                    {
                        input type="hidden" name="task" value=(task.name);

                        button type="submit" class=(BUTTON_PRIMARY_STYLE)
                        {
                            (task.name) " (+" (task.points) ")"
                        }
                    }
                }
            }
        }
    };

    base("Earn Points", &content)
}

#[cfg(test)]
mod earn_page_tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;

    use crate::{
        catalog::Catalog,
        endpoints,
        notify::Notifier,
        store::{CsvFileStore, LedgerStore},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{EarnState, get_earn_page};

    fn test_state(dir: &tempfile::TempDir) -> EarnState {
        EarnState {
            owner: "Scholar".to_owned(),
            local_timezone: "Etc/UTC".to_owned(),
            store: Arc::new(LedgerStore::CsvFile(CsvFileStore::new(
                dir.path().join("ledger.csv"),
            ))),
            catalog: Arc::new(Catalog::default()),
            notifier: Notifier::disabled(),
        }
    }

    #[tokio::test]
    async fn render_page_with_one_button_per_task() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let response = get_earn_page(State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let forms = Selector::parse(&format!("form[hx-post=\"{}\"]", endpoints::EARN_API)).unwrap();
        assert_eq!(
            html.select(&forms).count(),
            state.catalog.tasks.len(),
            "expected one form per catalog task"
        );
    }

    #[tokio::test]
    async fn fresh_ledger_shows_zero_points() {
        let dir = tempfile::tempdir().unwrap();

        let response = get_earn_page(State(test_state(&dir))).await;

        let html = parse_html_document(response).await;
        let metric = Selector::parse("#metric-value").unwrap();
        let value = html.select(&metric).next().expect("metric missing");
        assert_eq!(value.text().collect::<String>(), "0");
    }
}
