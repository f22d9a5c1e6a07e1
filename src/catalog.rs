//! The task and reward catalog.
//!
//! Catalog entries are immutable, process-wide constants loaded from the
//! configuration file at startup. They are never persisted to the ledger
//! store; only the transactions they produce are.

use rand::{Rng, seq::SliceRandom};
use serde::Deserialize;

use crate::Error;

/// A study task and the points it earns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    /// The task name shown on the earn page and written to the ledger.
    pub name: String,
    /// The points earned per completion. Always positive.
    pub points: i64,
}

/// A reward and the points it costs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reward {
    /// The reward name shown on the spend page.
    pub name: String,
    /// The points deducted on redemption. Always positive.
    pub cost: i64,
    /// Mystery rewards resolve to a randomly drawn outcome label at
    /// redemption time.
    #[serde(default)]
    pub mystery: bool,
}

/// The full set of tasks, rewards, and mystery-box outcome labels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    /// Tasks that earn points.
    #[serde(default = "default_tasks")]
    pub tasks: Vec<Task>,
    /// Rewards that spend points.
    #[serde(default = "default_rewards")]
    pub rewards: Vec<Reward>,
    /// The fixed set of labels a mystery-box redemption can resolve to.
    #[serde(default = "default_mystery_outcomes")]
    pub mystery_outcomes: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            tasks: default_tasks(),
            rewards: default_rewards(),
            mystery_outcomes: default_mystery_outcomes(),
        }
    }
}

fn default_tasks() -> Vec<Task> {
    [
        ("Focused study (45 min)", 15),
        ("Complete a past exam paper", 50),
        ("Memorise 10 short-answer questions", 20),
        ("Check in before 8:00 am", 10),
    ]
    .into_iter()
    .map(|(name, points)| Task {
        name: name.to_owned(),
        points,
    })
    .collect()
}

fn default_rewards() -> Vec<Reward> {
    vec![
        Reward {
            name: "Half-sugar milk tea".to_owned(),
            cost: 60,
            mystery: false,
        },
        Reward {
            name: "Fried chicken Thursday".to_owned(),
            cost: 120,
            mystery: false,
        },
        Reward {
            name: "Back massage voucher".to_owned(),
            cost: 200,
            mystery: false,
        },
        Reward {
            name: "Mystery box".to_owned(),
            cost: 100,
            mystery: true,
        },
    ]
}

fn default_mystery_outcomes() -> Vec<String> {
    vec![
        "Chore-free pass".to_owned(),
        "A kiss".to_owned(),
        "Better luck next time".to_owned(),
    ]
}

impl Catalog {
    /// Look up a task by its exact name.
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name == name)
    }

    /// Look up a reward by its exact name.
    pub fn reward(&self, name: &str) -> Option<&Reward> {
        self.rewards.iter().find(|reward| reward.name == name)
    }

    /// Draw one mystery-box outcome label.
    ///
    /// The draw is uniform over the configured set and independent on every
    /// call. Returns `None` only when no outcomes are configured, which
    /// [Catalog::validate] rules out for catalogs with a mystery reward.
    pub fn draw_mystery_outcome(&self, rng: &mut impl Rng) -> Option<&str> {
        self.mystery_outcomes
            .choose(rng)
            .map(|outcome| outcome.as_str())
    }

    /// Check the catalog invariants that serde cannot express.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] when a task or reward has a
    /// non-positive point value, or when a mystery reward is configured
    /// without any outcome labels to draw from.
    pub fn validate(&self) -> Result<(), Error> {
        for task in &self.tasks {
            if task.points <= 0 {
                return Err(Error::InvalidConfig(format!(
                    "task \"{}\" must earn a positive number of points, got {}",
                    task.name, task.points
                )));
            }
        }

        for reward in &self.rewards {
            if reward.cost <= 0 {
                return Err(Error::InvalidConfig(format!(
                    "reward \"{}\" must cost a positive number of points, got {}",
                    reward.name, reward.cost
                )));
            }
        }

        if self.rewards.iter().any(|reward| reward.mystery) && self.mystery_outcomes.is_empty() {
            return Err(Error::InvalidConfig(
                "a mystery reward is configured but mystery_outcomes is empty".to_owned(),
            ));
        }

        Ok(())
    }
}
