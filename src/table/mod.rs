//! Per-episode reward tables.
//!
//! A [`RewardTable`] maps an action identifier to its [`Coefficients`]:
//! the reward paid on the step the action happens, and the reward paid on
//! every later step while the action's effect stays active.
//!
//! Tables are built once before an episode and are never mutated by the
//! reward policies. A lookup of an action the table does not know is a
//! configuration error and surfaces as [`RewardError::UnknownAction`].

pub mod presets;

use std::collections::HashMap;
use std::fmt;

use crate::error::RewardError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two opposing agents a table or action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// Red agent.
    Attacker,
    /// Blue agent.
    Defender,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => write!(f, "attacker"),
            Side::Defender => write!(f, "defender"),
        }
    }
}

/// Coefficient pair associated with one action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coefficients {
    /// Reward paid on the step the action resolves.
    pub immediate: f64,
    /// Reward paid on each step while the action's effect persists.
    pub recurring: f64,
}

impl Coefficients {
    pub const fn new(immediate: f64, recurring: f64) -> Self {
        Self {
            immediate,
            recurring,
        }
    }
}

impl From<(f64, f64)> for Coefficients {
    fn from((immediate, recurring): (f64, f64)) -> Self {
        Self::new(immediate, recurring)
    }
}

/// Mapping from action identifier to [`Coefficients`] for one side.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardTable {
    side: Side,
    entries: HashMap<String, Coefficients>,
}

impl RewardTable {
    /// Creates an empty table for `side`.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            entries: HashMap::new(),
        }
    }

    /// Builds a table from `(name, immediate, recurring)` triples.
    ///
    /// Action names must be unique; a repeated name fails with
    /// [`RewardError::DuplicateAction`] rather than silently overwriting.
    pub fn from_entries<I, S>(side: Side, entries: I) -> Result<Self, RewardError>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let mut table = Self::new(side);
        for (name, immediate, recurring) in entries {
            table.insert(name, Coefficients::new(immediate, recurring))?;
        }
        Ok(table)
    }

    /// Adds an action, rejecting names already present.
    pub fn insert(
        &mut self,
        action: impl Into<String>,
        coefficients: Coefficients,
    ) -> Result<(), RewardError> {
        let action = action.into();
        if self.entries.contains_key(&action) {
            return Err(RewardError::DuplicateAction(action));
        }
        self.entries.insert(action, coefficients);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        action: impl Into<String>,
        immediate: f64,
        recurring: f64,
    ) -> Result<Self, RewardError> {
        self.insert(action, Coefficients::new(immediate, recurring))?;
        Ok(self)
    }

    /// Returns the coefficients for `action`.
    ///
    /// # Errors
    ///
    /// [`RewardError::UnknownAction`] if the action is not in the table.
    pub fn lookup(&self, action: &str) -> Result<Coefficients, RewardError> {
        self.entries
            .get(action)
            .copied()
            .ok_or_else(|| RewardError::unknown_action(self.side, action))
    }

    pub fn immediate(&self, action: &str) -> Result<f64, RewardError> {
        self.lookup(action).map(|c| c.immediate)
    }

    pub fn recurring(&self, action: &str) -> Result<f64, RewardError> {
        self.lookup(action).map(|c| c.recurring)
    }

    pub fn contains(&self, action: &str) -> bool {
        self.entries.contains_key(action)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wraps an already-deduplicated map, e.g. one deserialized from an
    /// agent definition's `{ name: { immediate, recurring } }` block.
    pub fn from_map(side: Side, entries: HashMap<String, Coefficients>) -> Self {
        Self { side, entries }
    }

    /// Iterates over `(action, coefficients)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coefficients)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RewardTable {
        RewardTable::from_entries(
            Side::Defender,
            [("deploy_decoy", -1.0, 5.0), ("remove_decoy", 0.0, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn lookup_known_action() {
        let table = sample();
        assert_eq!(
            table.lookup("deploy_decoy").unwrap(),
            Coefficients::new(-1.0, 5.0)
        );
        assert_eq!(table.immediate("deploy_decoy").unwrap(), -1.0);
        assert_eq!(table.recurring("deploy_decoy").unwrap(), 5.0);
    }

    #[test]
    fn lookup_unknown_action_fails() {
        let table = sample();
        assert_eq!(
            table.lookup("isolate"),
            Err(RewardError::UnknownAction {
                side: Side::Defender,
                action: "isolate".to_string(),
            })
        );
    }

    #[test]
    fn duplicate_entries_rejected() {
        let result = RewardTable::from_entries(
            Side::Attacker,
            [("scan", 1.0, 0.0), ("scan", 2.0, 0.0)],
        );
        assert_eq!(result, Err(RewardError::DuplicateAction("scan".into())));
    }

    #[test]
    fn builder_chain() {
        let table = RewardTable::new(Side::Attacker)
            .with("scan", 2.0, 1.0)
            .and_then(|t| t.with("impact", -8.0, -4.0))
            .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains("impact"));
        assert!(!table.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_map_deserialized() {
        let json = r#"{"deploy_decoy": {"immediate": -1.0, "recurring": 5.0}}"#;
        let map: HashMap<String, Coefficients> = serde_json::from_str(json).unwrap();
        let table = RewardTable::from_map(Side::Defender, map);
        assert_eq!(table.recurring("deploy_decoy").unwrap(), 5.0);
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn side_display() {
        assert_eq!(Side::Attacker.to_string(), "attacker");
        assert_eq!(Side::Defender.to_string(), "defender");
    }
}
