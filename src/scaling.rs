//! Numeric shaping helpers.
//!
//! The recurring-count penalty is quadratic in the distance from the
//! target range so that small excursions stay cheap and large ones grow
//! quickly, which discourages both idle and spamming policies.

use crate::error::RewardError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evaluates `a·x² + b·x + c`.
pub fn quadratic(x: f64, a: f64, b: f64, c: f64) -> f64 {
    a * x * x + b * x + c
}

/// Inclusive target range `[low, high]` for the number of active
/// defender effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardRange {
    low: usize,
    high: usize,
}

impl RewardRange {
    /// Creates a range, rejecting `low > high`.
    pub fn new(low: usize, high: usize) -> Result<Self, RewardError> {
        if low > high {
            return Err(RewardError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.low..=self.high).contains(&count)
    }

    /// Distance from `count` to the nearest bound, 0 inside the range.
    pub fn distance(&self, count: usize) -> usize {
        if count > self.high {
            count - self.high
        } else if count < self.low {
            self.low - count
        } else {
            0
        }
    }

    /// Re-checks the invariant; ranges built through serde bypass [`new`](Self::new).
    pub fn validate(&self) -> Result<(), RewardError> {
        Self::new(self.low, self.high).map(|_| ())
    }
}

impl Default for RewardRange {
    fn default() -> Self {
        Self { low: 0, high: 10 }
    }
}

/// Penalty applied when `count` falls outside `range`: `scaling · d²`
/// where `d` is the distance to the nearest bound.
pub fn out_of_range_penalty(count: usize, range: RewardRange, scaling: f64) -> f64 {
    match range.distance(count) {
        0 => 0.0,
        d => quadratic(d as f64, scaling, 0.0, 0.0),
    }
}
