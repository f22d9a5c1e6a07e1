#![allow(missing_docs)]
//! Helpers shared by the endpoint and page tests.

mod html;

pub(crate) use html::{assert_valid_html, parse_html_document, response_text};
