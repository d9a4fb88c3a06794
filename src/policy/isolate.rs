//! Host-isolation reward.

use tracing::debug;

use super::{RewardPolicy, StepOutcome, FAILED_ACTION_PENALTY};
use crate::error::RewardError;
use crate::recurring::RecurringBook;
use crate::table::RewardTable;

/// Stateless reward for isolation-style defenders.
///
/// An alerted attacker action pays the magnitude of its immediate
/// coefficient; an unalerted one pays the signed coefficient. A failed
/// defender action costs [`FAILED_ACTION_PENALTY`]. The recurring set is
/// maintained for the shared contract but never read.
#[derive(Debug, Clone)]
pub struct IsolateReward {
    attacker: RewardTable,
    book: RecurringBook,
}

impl IsolateReward {
    pub fn new(attacker: RewardTable) -> Self {
        Self {
            attacker,
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
        defender_success: bool,
        attacker_alerted: bool,
    ) -> Result<f64, RewardError> {
        let immediate = self.attacker.immediate(attacker_action)?;
        let red = if attacker_alerted {
            immediate.abs()
        } else {
            immediate
        };
        let blue = if defender_success {
            0.0
        } else {
            FAILED_ACTION_PENALTY
        };
        debug!(policy = self.name(), red, blue, "reward computed");
        Ok(red + blue)
    }
}

impl RewardPolicy for IsolateReward {
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError> {
        self.calculate_reward(
            step.attacker_action,
            step.defender_success,
            step.attacker_alerted,
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
        "isolate"
    }
}
