//! Decoy-deployment reward with range-shaped recurring costs.

use tracing::debug;

use super::{RewardPolicy, StepOutcome, FAILED_ACTION_PENALTY, NO_DEFENSE_PENALTY};
use crate::error::RewardError;
use crate::recurring::RecurringBook;
use crate::scaling::{out_of_range_penalty, RewardRange};
use crate::table::RewardTable;

pub const DEFAULT_SCALING_FACTOR: f64 = 10.0;

/// Rewards the defender for keeping the number of active decoys inside a
/// target range.
///
/// Outside `range` the recurring defender sum is reduced by
/// `scaling_factor · d²`, where `d` is the distance to the nearest bound.
/// The count is not capped; an agent may still deploy more or fewer
/// decoys, it just pays for it. With no decoys at all the recurring term is
/// pinned to [`NO_DEFENSE_PENALTY`].
#[derive(Debug, Clone)]
pub struct DecoyReward {
    attacker: RewardTable,
    defender: RewardTable,
    range: RewardRange,
    scaling_factor: f64,
    book: RecurringBook,
}

impl DecoyReward {
    /// Creates a policy with range `[0, 10]` and scaling factor `10.0`.
    pub fn new(attacker: RewardTable, defender: RewardTable) -> Self {
        Self {
            attacker,
            defender,
            range: RewardRange::default(),
            scaling_factor: DEFAULT_SCALING_FACTOR,
            book: RecurringBook::new(),
        }
    }

    /// Creates a policy with explicit shaping parameters.
    ///
    /// # Errors
    ///
    /// [`RewardError::InvalidRange`] if `range.low() > range.high()`,
    /// [`RewardError::InvalidScaling`] if `scaling_factor` is not finite.
    pub fn with_shaping(
        attacker: RewardTable,
        defender: RewardTable,
        range: RewardRange,
        scaling_factor: f64,
    ) -> Result<Self, RewardError> {
        range.validate()?;
        if !scaling_factor.is_finite() {
            return Err(RewardError::InvalidScaling(scaling_factor));
        }
        Ok(Self {
            range,
            scaling_factor,
            ..Self::new(attacker, defender)
        })
    }

    pub fn with_book(mut self, book: RecurringBook) -> Self {
        self.book = book;
        self
    }

    pub fn range(&self) -> RewardRange {
        self.range
    }

    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    pub fn calculate_reward(
        &self,
        attacker_action: &str,
        defender_action: &str,
        attacker_success: bool,
        defender_success: bool,
        attacker_alerted: bool,
    ) -> Result<f64, RewardError> {
        let red = self.attacker_reward(attacker_action, attacker_success, attacker_alerted)?;
        let blue = self.defender_reward(defender_action, defender_success)?;
        let recurring_blue = self.sum_recurring_defender()?;
        let recurring_red = self.sum_recurring_attacker()?;
        let total = red + blue + recurring_blue + recurring_red;
        debug!(
            policy = self.name(),
            red, blue, recurring_blue, recurring_red, total, "reward computed"
        );
        Ok(total)
    }

    /// An alerted attacker is paid `|immediate| · scaling · 10`.
    fn attacker_reward(&self, action: &str, success: bool, alerted: bool) -> Result<f64, RewardError> {
        let immediate = self.attacker.immediate(action)?;
        Ok(if alerted {
            immediate.abs() * self.scaling_factor * 10.0
        } else if success {
            immediate
        } else {
            0.0
        })
    }

    fn defender_reward(&self, action: &str, success: bool) -> Result<f64, RewardError> {
        let immediate = self.defender.immediate(action)?;
        Ok(if success {
            immediate
        } else {
            FAILED_ACTION_PENALTY * self.scaling_factor
        })
    }

    pub fn sum_recurring_defender(&self) -> Result<f64, RewardError> {
        let set = self.book.set();
        let count = set.defender_len();
        if count == 0 {
            return Ok(NO_DEFENSE_PENALTY);
        }
        let sum = set.sum_defender(&self.defender)?;
        Ok(sum - out_of_range_penalty(count, self.range, self.scaling_factor))
    }

    pub fn sum_recurring_attacker(&self) -> Result<f64, RewardError> {
        self.book
            .set()
            .sum_attacker(&self.attacker, self.scaling_factor * 10.0)
    }
}

impl RewardPolicy for DecoyReward {
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError> {
        self.calculate_reward(
            step.attacker_action,
            step.defender_action,
            step.attacker_success,
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
        "decoy"
    }
}
