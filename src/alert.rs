//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts render into the `#alert-container` element that the base layout
//! places on every page; endpoints return them directly and htmx swaps them
//! in without a full page load.

use maud::{Markup, html};

/// Renders a success alert.
pub fn alert_success(message: &str, details: &str) -> Markup {
    alert("alert alert-success", message, details)
}

/// Renders an error alert.
pub fn alert_error(message: &str, details: &str) -> Markup {
    alert("alert alert-error", message, details)
}

fn alert(class: &str, message: &str, details: &str) -> Markup {
    html! {
        div class=(class) role="alert" {
            strong { (message) }

            @if !details.is_empty() {
                p { (details) }
            }
        }
    }
}
