//! Runtime selection among the reward policies.

use std::fmt;
use std::str::FromStr;

use super::{
    DecoyReward, IsolateReward, RecurringReward, RestoreReward, RewardPolicy, StepDetectedReward,
    StepOutcome,
};
use crate::error::RewardError;
use crate::recurring::RecurringBook;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names the reward policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RewardKind {
    #[default]
    Decoy,
    Isolate,
    Recurring,
    Restore,
    StepDetected,
}

impl RewardKind {
    pub fn all() -> [RewardKind; 5] {
        [
            RewardKind::Decoy,
            RewardKind::Isolate,
            RewardKind::Recurring,
            RewardKind::Restore,
            RewardKind::StepDetected,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RewardKind::Decoy => "decoy",
            RewardKind::Isolate => "isolate",
            RewardKind::Recurring => "recurring",
            RewardKind::Restore => "restore",
            RewardKind::StepDetected => "step_detected",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardKind {
    type Err = RewardError;

    /// Accepts snake_case or kebab-case names, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        RewardKind::all()
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| RewardError::UnknownRewardKind(s.to_string()))
    }
}

/// One of the five reward policies behind a single type.
#[derive(Debug, Clone)]
pub enum AnyRewardPolicy {
    Decoy(DecoyReward),
    Isolate(IsolateReward),
    Recurring(RecurringReward),
    Restore(RestoreReward),
    StepDetected(StepDetectedReward),
}

impl AnyRewardPolicy {
    pub fn kind(&self) -> RewardKind {
        match self {
            AnyRewardPolicy::Decoy(_) => RewardKind::Decoy,
            AnyRewardPolicy::Isolate(_) => RewardKind::Isolate,
            AnyRewardPolicy::Recurring(_) => RewardKind::Recurring,
            AnyRewardPolicy::Restore(_) => RewardKind::Restore,
            AnyRewardPolicy::StepDetected(_) => RewardKind::StepDetected,
        }
    }

    fn inner(&self) -> &dyn RewardPolicy {
        match self {
            AnyRewardPolicy::Decoy(p) => p,
            AnyRewardPolicy::Isolate(p) => p,
            AnyRewardPolicy::Recurring(p) => p,
            AnyRewardPolicy::Restore(p) => p,
            AnyRewardPolicy::StepDetected(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RewardPolicy {
        match self {
            AnyRewardPolicy::Decoy(p) => p,
            AnyRewardPolicy::Isolate(p) => p,
            AnyRewardPolicy::Recurring(p) => p,
            AnyRewardPolicy::Restore(p) => p,
            AnyRewardPolicy::StepDetected(p) => p,
        }
    }
}

impl RewardPolicy for AnyRewardPolicy {
    fn evaluate(&mut self, step: &StepOutcome<'_>) -> Result<f64, RewardError> {
        self.inner_mut().evaluate(step)
    }

    fn reset(&mut self) {
        self.inner_mut().reset();
    }

    fn book(&self) -> &RecurringBook {
        self.inner().book()
    }

    fn book_mut(&mut self) -> &mut RecurringBook {
        self.inner_mut().book_mut()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

impl From<DecoyReward> for AnyRewardPolicy {
    fn from(p: DecoyReward) -> Self {
        AnyRewardPolicy::Decoy(p)
    }
}

impl From<IsolateReward> for AnyRewardPolicy {
    fn from(p: IsolateReward) -> Self {
        AnyRewardPolicy::Isolate(p)
    }
}

impl From<RecurringReward> for AnyRewardPolicy {
    fn from(p: RecurringReward) -> Self {
        AnyRewardPolicy::Recurring(p)
    }
}

impl From<RestoreReward> for AnyRewardPolicy {
    fn from(p: RestoreReward) -> Self {
        AnyRewardPolicy::Restore(p)
    }
}

impl From<StepDetectedReward> for AnyRewardPolicy {
    fn from(p: StepDetectedReward) -> Self {
        AnyRewardPolicy::StepDetected(p)
    }
}
