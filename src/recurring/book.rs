//! Outcome registration shared by every reward policy.

use std::fmt;

use tracing::trace;

use super::set::RecurringActionSet;
use crate::error::RewardError;

/// How a resolved defender action affects the recurring set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurringChange {
    Add,
    Remove,
    NoChange,
}

impl RecurringChange {
    /// Decodes the integer convention used by defender action results:
    /// `1` adds, `-1` removes, `0` leaves the set alone.
    pub fn from_code(code: i64) -> Result<Self, RewardError> {
        match code {
            1 => Ok(RecurringChange::Add),
            -1 => Ok(RecurringChange::Remove),
            0 => Ok(RecurringChange::NoChange),
            other => Err(RewardError::InvalidChangeKind(other)),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            RecurringChange::Add => 1,
            RecurringChange::Remove => -1,
            RecurringChange::NoChange => 0,
        }
    }
}

impl TryFrom<i64> for RecurringChange {
    type Error = RewardError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for RecurringChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurringChange::Add => write!(f, "add"),
            RecurringChange::Remove => write!(f, "remove"),
            RecurringChange::NoChange => write!(f, "no_change"),
        }
    }
}

/// Decides whether an attacker action leaves a recurring effect behind.
pub type AttackerPredicate = fn(&str) -> bool;

/// Default [`AttackerPredicate`]: the action name contains `impact`,
/// ignoring case.
///
/// This ties bookkeeping to the naming scheme of the attacker action
/// vocabulary; swap the predicate if that vocabulary changes.
pub fn is_impact_action(action: &str) -> bool {
    action.to_lowercase().contains("impact")
}

/// A [`RecurringActionSet`] plus the rules for mutating it from step
/// outcomes. Each policy owns exactly one.
#[derive(Debug, Clone)]
pub struct RecurringBook {
    set: RecurringActionSet,
    is_recurring_attack: AttackerPredicate,
}

impl RecurringBook {
    pub fn new() -> Self {
        Self::with_predicate(is_impact_action)
    }

    pub fn with_predicate(is_recurring_attack: AttackerPredicate) -> Self {
        Self {
            set: RecurringActionSet::new(),
            is_recurring_attack,
        }
    }

    /// Applies a defender outcome. Failed actions never change the set.
    pub fn register_defender_outcome(
        &mut self,
        action: &str,
        owner_id: &str,
        success: bool,
        change: RecurringChange,
    ) {
        if !success {
            trace!(action, owner_id, %change, "defender action failed; recurring set unchanged");
            return;
        }
        match change {
            RecurringChange::Add => self.set.add_defender(owner_id, action),
            RecurringChange::Remove => {
                self.set.remove_defender(owner_id);
            }
            RecurringChange::NoChange => {}
        }
    }

    /// Records an attacker effect when the predicate marks the action as recurring.
    ///
    /// The action is stored lower-cased, so attacker tables are keyed in
    /// lower case regardless of how the orchestrator spells the action.
    pub fn register_attacker_outcome(&mut self, action: &str, neutralized: bool) {
        if (self.is_recurring_attack)(action) {
            self.set.add_attacker(action.to_lowercase(), neutralized);
        }
    }

    pub fn set(&self) -> &RecurringActionSet {
        &self.set
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }
}

impl Default for RecurringBook {
    fn default() -> Self {
        Self::new()
    }
}
