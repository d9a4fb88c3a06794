//! Reward policies.
//!
//! Every policy owns one [`RecurringBook`] and shares the same lifecycle:
//! outcome-registration hooks mutate the book, [`RewardPolicy::evaluate`]
//! turns the current book plus one step's outcome into a scalar, and
//! [`RewardPolicy::reset`] returns the policy to its just-constructed state.
//! Only the formula differs between variants.
//!
//! | Variant            | Reads                                               | Recurring terms          |
//! |--------------------|-----------------------------------------------------|--------------------------|
//! | [`DecoyReward`]    | both actions, both success flags, attacker alerted  | range-shaped, floor -100 |
//! | [`IsolateReward`]  | attacker action, defender success, attacker alerted | none                     |
//! | [`RecurringReward`]| both actions, both success flags, decoy attack      | unshaped, 10× neutralize |
//! | [`RestoreReward`]  | both actions, both success flags                    | none                     |
//! | [`StepDetectedReward`] | attacker alerted, step index                    | defender sum only        |

pub mod any;
pub mod decoy;
pub mod isolate;
pub mod recurring;
pub mod restore;
pub mod step_detected;


pub use any::{AnyRewardPolicy, RewardKind};
pub use decoy::DecoyReward;
pub use isolate::IsolateReward;
pub use recurring::RecurringReward;
pub use restore::RestoreReward;
pub use step_detected::StepDetectedReward;

use crate::error::RewardError;
use crate::recurring::{RecurringActionSet, RecurringBook, RecurringChange};

/// Reward paid to the defender side when its action fails.
pub const FAILED_ACTION_PENALTY: f64 = -100.0;

/// Contribution used when the defender has too few active recurring effects.
pub const NO_DEFENSE_PENALTY: f64 = -100.0;

/// Everything any policy may read about one resolved step.
///
/// Policies ignore the fields their formula does not use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome<'a> {
    pub attacker_action: &'a str,
    pub defender_action: &'a str,
    pub attacker_success: bool,
    pub defender_success: bool,
    /// The attacker's action raised an alert.
    pub attacker_alerted: bool,
    /// The attacker's action targeted a decoy.
    pub decoy_attack: bool,
    /// Index of the step within the episode.
    pub step: u64,
}

impl<'a> StepOutcome<'a> {
    /// Creates an outcome where both actions failed, nothing was detected
    /// and the step index is 0.
    pub fn new(attacker_action: &'a str, defender_action: &'a str) -> Self {
        Self {
            attacker_action,
            defender_action,
            attacker_success: false,
            defender_success: false,
            attacker_alerted: false,
            decoy_attack: false,
            step: 0,
        }
    }

    pub fn with_success(mut self, attacker: bool, defender: bool) -> Self {
        self.attacker_success = attacker;
        self.defender_success = defender;
        self
    }

    pub fn alerted(mut self, alerted: bool) -> Self {
        self.attacker_alerted = alerted;
        self
    }

    pub fn on_decoy(mut self, decoy_attack: bool) -> Self {
        self.decoy_attack = decoy_attack;
        self
    }

    pub fn at_step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }
}

/// Shared contract of the reward policies.
///
/// A policy instance belongs to exactly one episode in one worker; parallel
/// episodes each own their own instance.
pub trait RewardPolicy {
    /// Computes the reward for one step.
    ///
    /// Never mutates the recurring set; only policy-local counters (such as
    /// the earliest detection step) may advance.
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError>;

    /// Restores the just-constructed state.
    fn reset(&mut self);

    fn book(&self) -> &RecurringBook;

    fn book_mut(&mut self) -> &mut RecurringBook;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Applies a defender outcome to the recurring set.
    fn register_defender_outcome(
        &mut self,
        action: &str,
        owner_id: &str,
        success: bool,
        change: RecurringChange,
    ) {
        self.book_mut()
            .register_defender_outcome(action, owner_id, success, change);
    }

    /// Like [`register_defender_outcome`](Self::register_defender_outcome)
    /// but takes the raw `-1 / 0 / 1` change code reported by defender actions.
    fn register_defender_code(
        &mut self,
        action: &str,
        owner_id: &str,
        success: bool,
        code: i64,
    ) -> Result<(), RewardError> {
        let change = RecurringChange::from_code(code)?;
        self.register_defender_outcome(action, owner_id, success, change);
        Ok(())
    }

    /// Records an attacker effect when the book's predicate matches `action`.
    fn register_attacker_outcome(&mut self, action: &str, neutralized: bool) {
        self.book_mut().register_attacker_outcome(action, neutralized);
    }

    fn recurring(&self) -> &RecurringActionSet {
        self.book().set()
    }
}
