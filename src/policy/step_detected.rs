//! Early-detection reward.

use tracing::debug;

use super::{RewardPolicy, StepOutcome, NO_DEFENSE_PENALTY};
use crate::error::RewardError;
use crate::recurring::RecurringBook;
use crate::table::RewardTable;

pub const DEFAULT_MIN_DECOYS: usize = 1;

/// Rewards the defender for detecting the attacker as early as possible.
///
/// Each time the attacker is alerted on a step earlier than any previous
/// detection in the episode, the defender earns `reward_scale / step` with
/// `reward_scale = max_steps · 10`. The best detection step starts unset
/// on construction and on [`reset`](RewardPolicy::reset), so no detection
/// has been seen yet.
///
/// Step `0` is treated as step `1` in the divisor.
#[derive(Debug, Clone)]
pub struct StepDetectedReward {
    defender: RewardTable,
    reward_scale: f64,
    min_decoys: usize,
    best_step: Option<u64>,
    book: RecurringBook,
}

impl StepDetectedReward {
    pub fn new(defender: RewardTable, max_steps: u64) -> Self {
        Self {
            defender,
            reward_scale: max_steps as f64 * 10.0,
            min_decoys: DEFAULT_MIN_DECOYS,
            best_step: None,
            book: RecurringBook::new(),
        }
    }

    pub fn with_book(mut self, book: RecurringBook) -> Self {
        self.book = book;
        self
    }

    pub fn with_min_decoys(mut self, min_decoys: usize) -> Self {
        self.min_decoys = min_decoys;
        self
    }

    /// Earliest detection step so far, `None` before any detection.
    pub fn best_step(&self) -> Option<u64> {
        self.best_step
    }

    pub fn reward_scale(&self) -> f64 {
        self.reward_scale
    }

    pub fn calculate_reward(
        &mut self,
        attacker_alerted: bool,
        step_detected: u64,
    ) -> Result<f64, RewardError> {
        let mut reward = 0.0;
        let improves = self.best_step.map_or(true, |best| step_detected < best);
        if attacker_alerted && improves {
            self.best_step = Some(step_detected);
            reward += self.reward_scale / step_detected.max(1) as f64;
        }

        if self.book.set().defender_len() < self.min_decoys {
            reward += NO_DEFENSE_PENALTY;
        }

        let recurring_blue = self.book.set().sum_defender(&self.defender)?;
        let total = reward + recurring_blue;
        debug!(
            policy = self.name(),
            best_step = ?self.best_step,
            recurring_blue,
            total,
            "reward computed"
        );
        Ok(total)
    }
}

impl RewardPolicy for StepDetectedReward {
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError> {
        self.calculate_reward(step.attacker_alerted, step.step)
    }

    fn reset(&mut self) {
        self.best_step = None;
        self.book.clear();
    }

    fn book(&self) -> &RecurringBook {
        &self.book
    }

    fn book_mut(&mut self) -> &mut RecurringBook {
        &mut self.book
    }

    fn name(&self) -> &'static str {
        "step_detected"
    }
}
