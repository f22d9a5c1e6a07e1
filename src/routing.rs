//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    earn::{earn_points_endpoint, get_earn_page},
    endpoints,
    history::get_ledger_page,
    not_found::get_404_not_found,
    spend::{get_spend_page, redeem_reward_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EARN_VIEW, get(get_earn_page))
        .route(endpoints::SPEND_VIEW, get(get_spend_page))
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(endpoints::EARN_API, post(earn_points_endpoint))
        .route(endpoints::REDEEM_API, post(redeem_reward_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the earn page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EARN_VIEW)
}
