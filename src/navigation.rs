//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::EARN_VIEW,
                title: "Earn points",
                is_current: active_endpoint == endpoints::EARN_VIEW,
            },
            Link {
                url: endpoints::SPEND_VIEW,
                title: "Spend points",
                is_current: active_endpoint == endpoints::SPEND_VIEW,
            },
            Link {
                url: endpoints::LEDGER_VIEW,
                title: "Ledger",
                is_current: active_endpoint == endpoints::LEDGER_VIEW,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="tabs" aria-label="Primary"
            {
                @for link in self.links {
                    a
                        href=(link.url)
                        class=[link.is_current.then_some("active")]
                        aria-current=[link.is_current.then_some("page")]
                    {
                        (link.title)
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::EARN_VIEW, true);
        cases.insert(endpoints::SPEND_VIEW, true);
        cases.insert(endpoints::LEDGER_VIEW, true);

        cases.insert(endpoints::ROOT, false);
        cases.insert(endpoints::EARN_API, false);
        cases.insert(endpoints::REDEEM_API, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current, should_be_active,
                    "link for {endpoint} should have is_current = {should_be_active}",
                )
            } else {
                assert!(
                    !link.is_current,
                    "link for {} should be inactive when {endpoint} is current",
                    link.url,
                )
            }
        }
    }

    #[test]
    fn active_link_is_marked_in_html() {
        let html = NavBar::new(endpoints::SPEND_VIEW).into_html().into_string();

        assert!(html.contains("aria-current=\"page\""));
        assert!(html.contains("class=\"active\""));
    }
}
