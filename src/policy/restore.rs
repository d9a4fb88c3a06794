//! Host-restoration reward.

use tracing::{debug, error, info};

use super::{RewardPolicy, StepOutcome};
use crate::error::RewardError;
use crate::recurring::RecurringBook;
use crate::table::RewardTable;

/// Stateless reward: each side earns its immediate coefficient on success
/// and its negation on failure.
#[derive(Debug, Clone)]
pub struct RestoreReward {
    attacker: RewardTable,
    defender: RewardTable,
    book: RecurringBook,
}

fn signed(immediate: f64, success: bool) -> f64 {
    if success {
        immediate
    } else {
        -immediate
    }
}

impl RestoreReward {
    pub fn new(attacker: RewardTable, defender: RewardTable) -> Self {
        Self {
            attacker,
            defender,
            book: RecurringBook::new(),
        }
    }

    pub fn with_book(mut self, book: RecurringBook) -> Self {
        self.book = book;
        self
    }

    pub fn calculate_reward(
        &self,
        attacker_action: &str,
        defender_action: &str,
        attacker_success: bool,
        defender_success: bool,
    ) -> Result<f64, RewardError> {
        let lookup = |table: &RewardTable, action: &str| {
            table.immediate(action).inspect_err(|e| {
                error!(policy = "restore", "{e}");
            })
        };
        let red = signed(lookup(&self.attacker, attacker_action)?, attacker_success);
        let blue = signed(lookup(&self.defender, defender_action)?, defender_success);

        let total = red + blue;
        info!(policy = self.name(), total, "reward computed");
        debug!(red, blue, "restore reward components");
        Ok(total)
    }
}

impl RewardPolicy for RestoreReward {
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError> {
        self.calculate_reward(
            step.attacker_action,
            step.defender_action,
            step.attacker_success,
            step.defender_success,
        )
    }

    fn reset(&mut self) {
        self.book.clear();
    }

    fn book(&self) -> &RecurringBook {
        &self.book
    }

    fn book_mut(&mut self) -> &mut RecurringBook {
        &mut self.book
    }

    fn name(&self) -> &'static str {
        "restore"
    }
}
