//! The base page layout and small shared view helpers.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::store::LedgerStore;

// Shared element styles.
pub const PAGE_CONTAINER_STYLE: &str = "page";
pub const BUTTON_PRIMARY_STYLE: &str = "btn btn-primary";
pub const TABLE_STYLE: &str = "ledger-table";

/// The stylesheet is small enough to inline into every page, which keeps the
/// app a single binary with no static asset pipeline.
const STYLESHEET: &str = r#"
:root { color-scheme: light dark; }
body {
    margin: 0;
    font-family: system-ui, sans-serif;
    background: #f8fafc;
    color: #0f172a;
}
@media (prefers-color-scheme: dark) {
    body { background: #0f172a; color: #e2e8f0; }
}
.page { max-width: 40rem; margin: 0 auto; padding: 1rem 1.5rem 4rem; }
nav.tabs { display: flex; gap: 0.5rem; padding: 1rem 0; }
nav.tabs a {
    padding: 0.5rem 1rem;
    border-radius: 0.5rem;
    text-decoration: none;
    color: inherit;
    font-weight: 600;
}
nav.tabs a.active { background: #2563eb; color: #fff; }
.metric { margin: 1rem 0 2rem; }
.metric h1 { font-size: 1.4rem; margin: 0 0 0.75rem; }
.metric-label { display: block; font-size: 0.9rem; opacity: 0.7; }
.metric-value { font-size: 2.5rem; font-weight: 700; }
.metric-hint { margin-left: 0.5rem; color: #16a34a; font-weight: 600; }
.banner-warning {
    background: #fef3c7;
    color: #92400e;
    border-radius: 0.5rem;
    padding: 0.75rem 1rem;
    margin-bottom: 1rem;
}
.btn {
    padding: 0.6rem 1rem;
    border: none;
    border-radius: 0.5rem;
    font-size: 1rem;
    cursor: pointer;
}
.btn-primary { background: #2563eb; color: #fff; }
.btn-primary:hover { background: #1d4ed8; }
.task-list, .reward-list { display: flex; flex-direction: column; gap: 0.75rem; }
.reward-row {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 1rem;
}
.ledger-table { width: 100%; border-collapse: collapse; }
.ledger-table th, .ledger-table td {
    text-align: left;
    padding: 0.5rem 0.75rem;
    border-bottom: 1px solid rgba(128, 128, 128, 0.3);
}
.points-positive { color: #16a34a; }
.points-negative { color: #dc2626; }
.alert { border-radius: 0.5rem; padding: 0.75rem 1rem; margin-top: 1rem; }
.alert p { margin: 0.25rem 0 0; }
.alert-success { background: #dcfce7; color: #166534; }
.alert-error { background: #fee2e2; color: #991b1b; }
.empty-state { opacity: 0.7; font-style: italic; }
"#;

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Studybank" }

                script src="https://unpkg.com/htmx.org@2.0.8" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4" {}

                style { (PreEscaped(STYLESHEET)) }
            }

            body hx-ext="response-targets"
            {
                (content)

                // Alert container for out-of-band swaps and error targets.
                div id="alert-container" {}
            }
        }
    }
}

/// The title and current-balance header shown on the earn and spend pages.
pub fn points_metric(owner: &str, total: i64) -> Markup {
    html! {
        header class="metric"
        {
            h1 { (owner) "'s study bank" }

            span class="metric-label" { "Current points" }
            span id="metric-value" class="metric-value" { (total) }
            span class="metric-hint" { "Keep going!" }
        }
    }
}

/// An out-of-band copy of the balance, for endpoints that answer with an
/// alert fragment but still need the on-page metric to update.
pub fn metric_value_oob(total: i64) -> Markup {
    html! {
        span id="metric-value" class="metric-value" hx-swap-oob="true" { (total) }
    }
}

/// A warning shown on every page while running on the CSV fallback instead
/// of the configured spreadsheet. Empty markup otherwise.
pub fn fallback_banner(store: &LedgerStore) -> Markup {
    if !store.is_fallback() {
        return html! {};
    }

    html! {
        div class="banner-warning"
        {
            "The spreadsheet is not connected. Entries are being recorded to "
            (store.describe())
            " and will not sync."
        }
    }
}

/// Format a signed point delta with an explicit plus sign for income.
pub fn format_points(points: i64) -> String {
    if points > 0 {
        format!("+{points}")
    } else {
        points.to_string()
    }
}

/// The colour class for a signed point delta.
pub fn points_class(points: i64) -> &'static str {
    if points < 0 {
        "points-negative"
    } else {
        "points-positive"
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            div class="metric"
            {
                h1 { (header) }

                p { (description) }

                p { (fix) }

                a href="/" { "Back to the earn page" }
            }
        }
    );

    base(title, &content)
}
