//! Reward with unshaped recurring sums.

use tracing::debug;

use super::{RewardPolicy, StepOutcome, FAILED_ACTION_PENALTY, NO_DEFENSE_PENALTY};
use crate::error::RewardError;
use crate::recurring::RecurringBook;
use crate::table::RewardTable;

/// Attacker reward when its action failed or landed on a decoy.
pub const DECOYED_ATTACK_REWARD: f64 = 50.0;

/// Multiplier applied to neutralized attacker effects.
pub const NEUTRALIZED_MULTIPLIER: f64 = 10.0;

/// Sums immediate and recurring rewards for both sides without range
/// shaping.
///
/// The defender pays [`NO_DEFENSE_PENALTY`] on top of its immediate reward
/// on every step it has no active recurring effect.
#[derive(Debug, Clone)]
pub struct RecurringReward {
    attacker: RewardTable,
    defender: RewardTable,
    book: RecurringBook,
}

impl RecurringReward {
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
        decoy_attack: bool,
    ) -> Result<f64, RewardError> {
        let red_immediate = self.attacker.immediate(attacker_action)?;
        let blue_immediate = self.defender.immediate(defender_action)?;

        let red = if attacker_success && !decoy_attack {
            red_immediate
        } else {
            DECOYED_ATTACK_REWARD
        };
        let mut blue = if defender_success {
            blue_immediate
        } else {
            FAILED_ACTION_PENALTY
        };
        if self.book.set().defender_len() < 1 {
            blue += NO_DEFENSE_PENALTY;
        }

        let recurring_blue = self.book.set().sum_defender(&self.defender)?;
        let recurring_red = self
            .book
            .set()
            .sum_attacker(&self.attacker, NEUTRALIZED_MULTIPLIER)?;
        let total = red + blue + recurring_blue + recurring_red;
        debug!(
            policy = self.name(),
            red, blue, recurring_blue, recurring_red, total, "reward computed"
        );
        Ok(total)
    }
}

impl RewardPolicy for RecurringReward {
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError> {
        self.calculate_reward(
            step.attacker_action,
            step.defender_action,
            step.attacker_success,
            step.defender_success,
            step.decoy_attack,
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
        "recurring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurring::RecurringChange;
    use crate::table::Side;

    fn policy() -> RecurringReward {
        RecurringReward::new(
            RewardTable::from_entries(Side::Attacker, [("scan", 2.0, 0.0), ("impact", -8.0, 4.0)])
                .unwrap(),
            RewardTable::from_entries(Side::Defender, [("deploy_decoy", -1.0, 5.0), ("nothing", 0.0, 0.0)])
                .unwrap(),
        )
    }

    #[test]
    fn successful_attack_on_real_host() {
        let mut p = policy();
        p.register_defender_outcome("deploy_decoy", "d1", true, RecurringChange::Add);
        let r = p
            .calculate_reward("scan", "nothing", true, true, false)
            .unwrap();
        // 2 + 0 + 5
        assert!((r - 7.0).abs() < 1e-9);
    }

    #[test]
    fn decoyed_attack_pays_fixed_reward() {
        let mut p = policy();
        p.register_defender_outcome("deploy_decoy", "d1", true, RecurringChange::Add);
        let r = p
            .calculate_reward("scan", "nothing", true, true, true)
            .unwrap();
        assert!((r - (50.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn no_active_defense_costs_extra() {
        let p = policy();
        let r = p
            .calculate_reward("scan", "nothing", true, false, false)
            .unwrap();
        // 2 - 100 (failed) - 100 (no decoys)
        assert!((r - (2.0 - 200.0)).abs() < 1e-9);
    }

    #[test]
    fn neutralized_impact_subtracts_ten_times() {
        let mut p = policy();
        p.register_defender_outcome("deploy_decoy", "d1", true, RecurringChange::Add);
        p.register_attacker_outcome("impact", true);
        p.register_attacker_outcome("impact", false);
        let r = p
            .calculate_reward("scan", "nothing", true, true, false)
            .unwrap();
        // 2 + 0 + 5 + (-40 + 4)
        assert!((r - (7.0 - 36.0)).abs() < 1e-9);
    }

    #[test]
    fn unknown_actions_fail_on_failure_branches() {
        let mut p = policy();
        p.register_defender_outcome("deploy_decoy", "d1", true, RecurringChange::Add);
        assert_eq!(
            p.calculate_reward("exfiltrate", "nothing", false, false, false),
            Err(RewardError::UnknownAction {
                side: Side::Attacker,
                action: "exfiltrate".into()
            })
        );
        assert_eq!(
            p.calculate_reward("scan", "reimage", true, false, true),
            Err(RewardError::UnknownAction {
                side: Side::Defender,
                action: "reimage".into()
            })
        );
        assert!(p
            .calculate_reward("exfiltrate", "reimage", false, false, false)
            .is_err());
    }

    #[test]
    fn no_change_leaves_set_intact() {
        let mut p = policy();
        p.register_defender_outcome("deploy_decoy", "d1", true, RecurringChange::Add);
        p.register_defender_outcome("nothing", "d1", true, RecurringChange::NoChange);
        assert_eq!(p.recurring().defender_len(), 1);
    }
}
