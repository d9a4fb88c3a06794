//! Configuration for selecting and shaping a reward policy.

use tracing::debug;

use crate::error::RewardError;
use crate::policy::decoy::DEFAULT_SCALING_FACTOR;
use crate::policy::step_detected::DEFAULT_MIN_DECOYS;
use crate::policy::{
    AnyRewardPolicy, DecoyReward, IsolateReward, RecurringReward, RestoreReward, RewardKind,
    StepDetectedReward,
};
use crate::scaling::RewardRange;
use crate::table::RewardTable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reward policy configuration.
///
/// Fields a variant does not use are ignored by it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Which policy to build.
    pub kind: RewardKind,

    // --- Decoy shaping ---
    /// Target range for the number of active defender effects.
    pub range: RewardRange,
    /// Quadratic coefficient for out-of-range counts; also scales the
    /// alert and failure terms.
    pub scaling_factor: f64,

    // --- Step detection ---
    /// Episode length; the detection reward scale is `max_steps × 10`.
    pub max_steps: u64,
    /// Fewer active defender effects than this costs the defender each step.
    pub min_decoys: usize,
}

impl RewardConfig {
    pub fn new(kind: RewardKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Checks the shaping parameters without building a policy.
    pub fn validate(&self) -> Result<(), RewardError> {
        self.range.validate()?;
        if !self.scaling_factor.is_finite() {
            return Err(RewardError::InvalidScaling(self.scaling_factor));
        }
        Ok(())
    }

    /// Builds the configured policy from the episode's reward tables.
    pub fn build(
        &self,
        attacker: RewardTable,
        defender: RewardTable,
    ) -> Result<AnyRewardPolicy, RewardError> {
        self.validate()?;
        debug!(kind = %self.kind, "building reward policy");
        let policy: AnyRewardPolicy = match self.kind {
            RewardKind::Decoy => {
                DecoyReward::with_shaping(attacker, defender, self.range, self.scaling_factor)?
                    .into()
            }
            RewardKind::Isolate => IsolateReward::new(attacker).into(),
            RewardKind::Recurring => RecurringReward::new(attacker, defender).into(),
            RewardKind::Restore => RestoreReward::new(attacker, defender).into(),
            RewardKind::StepDetected => StepDetectedReward::new(defender, self.max_steps)
                .with_min_decoys(self.min_decoys)
                .into(),
        };
        Ok(policy)
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            kind: RewardKind::default(),
            range: RewardRange::default(),
            scaling_factor: DEFAULT_SCALING_FACTOR,
            max_steps: 100,
            min_decoys: DEFAULT_MIN_DECOYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RewardPolicy;
    use crate::table::Side;

    fn tables() -> (RewardTable, RewardTable) {
        (
            RewardTable::from_entries(Side::Attacker, [("scan", 2.0, 1.0)]).unwrap(),
            RewardTable::from_entries(Side::Defender, [("decoy", -1.0, 5.0)]).unwrap(),
        )
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = RewardConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.kind, RewardKind::Decoy);
        assert_eq!(cfg.scaling_factor, 10.0);
        assert_eq!(cfg.min_decoys, 1);
    }

    #[test]
    fn builds_every_kind() {
        for kind in RewardKind::all() {
            let (red, blue) = tables();
            let policy = RewardConfig::new(kind).build(red, blue).unwrap();
            assert_eq!(policy.kind(), kind);
            assert_eq!(policy.name(), kind.as_str());
        }
    }

    #[test]
    fn infinite_scaling_rejected() {
        let (red, blue) = tables();
        let cfg = RewardConfig {
            scaling_factor: f64::INFINITY,
            ..RewardConfig::default()
        };
        assert!(matches!(
            cfg.build(red, blue),
            Err(RewardError::InvalidScaling(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let json = r#"{"kind": "step_detected", "max_steps": 40}"#;
        let cfg: RewardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.kind, RewardKind::StepDetected);
        assert_eq!(cfg.max_steps, 40);
        assert_eq!(cfg.range, RewardRange::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn inverted_range_caught_after_deserialize() {
        let json = r#"{"range": {"low": 6, "high": 2}}"#;
        let cfg: RewardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            cfg.validate(),
            Err(RewardError::InvalidRange { low: 6, high: 2 })
        );
    }
}
