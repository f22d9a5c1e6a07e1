//! The API endpoints URIs.

/// The root route which redirects to the earn page.
pub const ROOT: &str = "/";
/// The page for logging completed tasks.
pub const EARN_VIEW: &str = "/earn";
/// The page for redeeming rewards.
pub const SPEND_VIEW: &str = "/spend";
/// The page listing the full transaction ledger.
pub const LEDGER_VIEW: &str = "/ledger";

/// The route for recording a completed task.
pub const EARN_API: &str = "/api/earn";
/// The route for redeeming a reward.
pub const REDEEM_API: &str = "/api/redeem";

// These tests are here so that we know the routes will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::EARN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SPEND_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LEDGER_VIEW);

        assert_endpoint_is_valid_uri(endpoints::EARN_API);
        assert_endpoint_is_valid_uri(endpoints::REDEEM_API);
    }
}
