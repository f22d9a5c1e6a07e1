//! The spend-points page and the reward redemption endpoint.

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
    catalog::{Catalog, Reward},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, fallback_banner, metric_value_oob, points_metric},
    ledger::{Record, compute_total},
    navigation::NavBar,
    notify::Notifier,
    store::LedgerStore,
    timezone::local_now,
};

/// The state needed for the spend page and endpoint.
#[derive(Debug, Clone)]
pub struct SpendState {
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

impl FromRef<AppState> for SpendState {
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

/// The form data for redeeming a reward.
#[derive(Debug, Deserialize)]
pub struct RedeemForm {
    /// The catalog name of the reward to redeem.
    pub reward: String,
}

/// Render the spend page: the balance metric and one row per reward.
pub async fn get_spend_page(State(state): State<SpendState>) -> Response {
    let records = match state.store.load_all().await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("could not load the ledger: {error}");
            return error.into_response();
        }
    };

    spend_view(
        &state.owner,
        compute_total(&records),
        &state.catalog.rewards,
        &fallback_banner(&state.store),
    )
    .into_response()
}

/// Redeem a reward, guarded by the current balance.
///
/// The balance is recomputed from a fresh full scan; if it does not cover
/// the cost the redemption is rejected and nothing is written. Mystery
/// rewards draw their outcome label exactly once, before the record is
/// constructed, so a retried request draws again rather than reusing a
/// stale draw.
pub async fn redeem_reward_endpoint(
    State(state): State<SpendState>,
    Form(form): Form<RedeemForm>,
) -> Response {
    let Some(reward) = state.catalog.reward(&form.reward) else {
        return Error::UnknownReward(form.reward).into_alert_response();
    };

    let records = match state.store.load_all().await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("could not load the ledger: {error}");
            return error.into_alert_response();
        }
    };

    let total = compute_total(&records);

    if total < reward.cost {
        return Error::InsufficientPoints {
            cost: reward.cost,
            total,
        }
        .into_alert_response();
    }

    let item = redeemed_item_label(reward, &state.catalog);
    let record = Record::expense(&item, reward.cost, None, local_now(&state.local_timezone));

    if let Err(error) = state.store.append(&record).await {
        tracing::error!("could not record redemption of \"{item}\": {error}");
        return error.into_alert_response();
    }

    let total = total - reward.cost;

    state.notifier.dispatch(format!(
        "{} redeemed \"{item}\" for {} points. Balance: {total}.",
        state.owner, reward.cost
    ));

    html! {
        (alert_success(
            "Redeemed!",
            &format!("\"{item}\" is yours. Balance: {total}."),
        ))
        (metric_value_oob(total))
    }
    .into_response()
}

/// The item text written to the ledger for a redemption.
///
/// Mystery rewards embed the drawn outcome label so the ledger keeps a
/// permanent record of what the box contained.
fn redeemed_item_label(reward: &Reward, catalog: &Catalog) -> String {
    if !reward.mystery {
        return reward.name.clone();
    }

    match catalog.draw_mystery_outcome(&mut rand::thread_rng()) {
        Some(outcome) => format!("{}: {outcome}", reward.name),
        None => reward.name.clone(),
    }
}

fn spend_view(owner: &str, total: i64, rewards: &[Reward], banner: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::SPEND_VIEW).into_html();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            (nav_bar)
            (banner)
            (points_metric(owner, total))

            div class="reward-list"
            {
                @for reward in rewards {
                    div class="reward-row"
                    {
                        span { (reward.name) " (" (reward.cost) " points)" }

                        form
                            hx-post=(endpoints::REDEEM_API)
                            hx-target="#alert-container"
                            hx-swap="innerHTML"
                            hx-target-error="#alert-container"
                        {
                            input type="hidden" name="reward" value=(reward.name);

                            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Redeem" }
                        }
                    }
                }
            }
        }
    };

    base("Spend Points", &content)
}


#[cfg(test)]
mod redeem_endpoint_tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use time::macros::datetime;

    use crate::{
        catalog::Catalog,
        ledger::{EntryKind, Record, compute_total},
        notify::Notifier,
        store::{CsvFileStore, LedgerStore},
        test_utils::response_text,
    };

    use super::{RedeemForm, SpendState, redeem_reward_endpoint};

    fn test_state(dir: &tempfile::TempDir) -> SpendState {
        SpendState {
            owner: "Scholar".to_owned(),
            local_timezone: "Etc/UTC".to_owned(),
            store: Arc::new(LedgerStore::CsvFile(CsvFileStore::new(
                dir.path().join("ledger.csv"),
            ))),
            catalog: Arc::new(Catalog::default()),
            notifier: Notifier::disabled(),
        }
    }

    async fn seed_income(state: &SpendState, points: i64) {
        state
            .store
            .append(&Record::income(
                "Seed",
                points,
                None,
                datetime!(2026-03-01 08:00),
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn redemption_is_rejected_when_points_are_short() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        seed_income(&state, 50).await;
        let form = RedeemForm {
            reward: "Half-sugar milk tea".to_owned(),
        };

        let response = redeem_reward_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_text(response).await;
        assert!(body.contains("Not enough points"));

        // Ledger unchanged: same length, same total.
        let records = state.store.load_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(compute_total(&records), 50);
    }

    #[tokio::test]
    async fn redemption_spends_the_exact_cost() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        seed_income(&state, 120).await;
        let form = RedeemForm {
            reward: "Fried chicken Thursday".to_owned(),
        };

        let response = redeem_reward_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let records = state.store.load_all().await.unwrap();
        assert_eq!(records.len(), 2);
        let redemption = records.last().unwrap();
        assert_eq!(redemption.kind, EntryKind::Expense);
        assert_eq!(redemption.points, -120);
        assert_eq!(compute_total(&records), 0);
    }

    #[tokio::test]
    async fn a_reward_costing_the_exact_balance_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        seed_income(&state, 60).await;
        let form = RedeemForm {
            reward: "Half-sugar milk tea".to_owned(),
        };

        let response = redeem_reward_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_an_unknown_reward() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        seed_income(&state, 500).await;
        let form = RedeemForm {
            reward: "World peace".to_owned(),
        };

        let response = redeem_reward_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mystery_redemptions_embed_a_configured_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        seed_income(&state, 1000).await;
        let form = RedeemForm {
            reward: "Mystery box".to_owned(),
        };

        let response = redeem_reward_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let records = state.store.load_all().await.unwrap();
        let redemption = records.last().unwrap();
        let outcome = redemption
            .item
            .strip_prefix("Mystery box: ")
            .expect("mystery redemption should embed its outcome");
        assert!(
            state
                .catalog
                .mystery_outcomes
                .iter()
                .any(|label| label == outcome),
            "\"{outcome}\" is not a configured outcome"
        );
        assert_eq!(redemption.points, -100);
    }
}
