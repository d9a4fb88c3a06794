//! Ordered bookkeeping of effects that persist across steps.

use tracing::{trace, warn};

use crate::error::RewardError;
use crate::table::RewardTable;

/// One persistent defender effect, e.g. a single deployed decoy.
///
/// `owner_id` is the handle used to remove exactly this effect later; it is
/// distinct from `action`, which selects the coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEntry {
    pub owner_id: String,
    pub action: String,
}

/// One persistent attacker effect, e.g. an ongoing compromise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackerRecurringEntry {
    pub action: String,
    /// Whether the effect landed on a decoy when it was created.
    pub neutralized: bool,
}

/// Active recurring effects for both sides within one episode.
///
/// Insertion order is kept so iteration is deterministic; the reward sums
/// only depend on the multiset of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurringActionSet {
    defender: Vec<RecurringEntry>,
    attacker: Vec<AttackerRecurringEntry>,
}

impl RecurringActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a defender effect. Owner ids are not deduplicated.
    pub fn add_defender(&mut self, owner_id: impl Into<String>, action: impl Into<String>) {
        let entry = RecurringEntry {
            owner_id: owner_id.into(),
            action: action.into(),
        };
        if self.contains_owner(&entry.owner_id) {
            warn!(
                owner_id = %entry.owner_id,
                action = %entry.action,
                "owner id already active; removal will drop every entry sharing it"
            );
        }
        trace!(owner_id = %entry.owner_id, action = %entry.action, "recurring defender effect added");
        self.defender.push(entry);
    }

    /// Removes every defender entry owned by `owner_id`. Unknown ids are a no-op.
    ///
    /// Returns the number of entries removed.
    pub fn remove_defender(&mut self, owner_id: &str) -> usize {
        let before = self.defender.len();
        self.defender.retain(|e| e.owner_id != owner_id);
        let removed = before - self.defender.len();
        trace!(owner_id, removed, "recurring defender effect removed");
        removed
    }

    pub fn add_attacker(&mut self, action: impl Into<String>, neutralized: bool) {
        let action = action.into();
        trace!(action = %action, neutralized, "recurring attacker effect added");
        self.attacker.push(AttackerRecurringEntry {
            action,
            neutralized,
        });
    }

    /// Sum of the `recurring` coefficients of every active defender effect.
    ///
    /// Range shaping is left to the caller.
    pub fn sum_defender(&self, table: &RewardTable) -> Result<f64, RewardError> {
        self.defender
            .iter()
            .map(|e| table.recurring(&e.action))
            .sum()
    }

    /// Signed sum over attacker effects.
    ///
    /// A live effect contributes its `recurring` coefficient; a neutralized
    /// one contributes `-recurring × neutralized_multiplier`.
    pub fn sum_attacker(
        &self,
        table: &RewardTable,
        neutralized_multiplier: f64,
    ) -> Result<f64, RewardError> {
        self.attacker
            .iter()
            .map(|e| -> Result<f64, RewardError> {
                let recurring = table.recurring(&e.action)?;
                Ok(if e.neutralized {
                    -recurring * neutralized_multiplier
                } else {
                    recurring
                })
            })
            .sum()
    }

    /// Empties both sides.
    pub fn clear(&mut self) {
        self.defender.clear();
        self.attacker.clear();
    }

    pub fn defender_len(&self) -> usize {
        self.defender.len()
    }

    pub fn attacker_len(&self) -> usize {
        self.attacker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defender.is_empty() && self.attacker.is_empty()
    }

    pub fn contains_owner(&self, owner_id: &str) -> bool {
        self.defender.iter().any(|e| e.owner_id == owner_id)
    }

    pub fn defender_entries(&self) -> &[RecurringEntry] {
        &self.defender
    }

    pub fn attacker_entries(&self) -> &[AttackerRecurringEntry] {
        &self.attacker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Side;

    fn defender_table() -> RewardTable {
        RewardTable::from_entries(Side::Defender, [("decoy", -1.0, 5.0), ("honeytoken", 0.0, 2.0)])
            .unwrap()
    }

    fn attacker_table() -> RewardTable {
        RewardTable::from_entries(Side::Attacker, [("impact", -8.0, 4.0)]).unwrap()
    }

    #[test]
    fn new_set_is_empty() {
        let set = RecurringActionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.defender_len(), 0);
        assert_eq!(set.attacker_len(), 0);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut set = RecurringActionSet::new();
        set.add_defender("b", "decoy");
        set.add_defender("a", "honeytoken");
        let owners: Vec<_> = set.defender_entries().iter().map(|e| e.owner_id.as_str()).collect();
        assert_eq!(owners, vec!["b", "a"]);
    }

    #[test]
    fn remove_unknown_owner_is_noop() {
        let mut set = RecurringActionSet::new();
        set.add_defender("d1", "decoy");
        assert_eq!(set.remove_defender("missing"), 0);
        assert_eq!(set.defender_len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut set = RecurringActionSet::new();
        set.add_defender("d1", "decoy");
        set.add_defender("d2", "decoy");
        set.remove_defender("d1");
        let once = set.clone();
        set.remove_defender("d1");
        assert_eq!(set, once);
    }

    #[test]
    fn duplicate_owner_removed_together() {
        let mut set = RecurringActionSet::new();
        set.add_defender("d1", "decoy");
        set.add_defender("d1", "honeytoken");
        set.add_defender("d2", "decoy");
        assert_eq!(set.remove_defender("d1"), 2);
        assert_eq!(set.defender_len(), 1);
    }

    #[test]
    fn sum_defender_adds_recurring() {
        let mut set = RecurringActionSet::new();
        set.add_defender("d1", "decoy");
        set.add_defender("d2", "honeytoken");
        let sum = set.sum_defender(&defender_table()).unwrap();
        assert!((sum - 7.0).abs() < 1e-12);
    }

    #[test]
    fn sum_defender_unknown_action_propagates() {
        let mut set = RecurringActionSet::new();
        set.add_defender("d1", "firewall");
        assert_eq!(
            set.sum_defender(&defender_table()),
            Err(RewardError::UnknownAction {
                side: Side::Defender,
                action: "firewall".into()
            })
        );
    }

    #[test]
    fn neutralized_attacker_effect_flips_sign() {
        let table = attacker_table();
        let mut live = RecurringActionSet::new();
        live.add_attacker("impact", false);
        let mut caught = RecurringActionSet::new();
        caught.add_attacker("impact", true);

        assert!((live.sum_attacker(&table, 10.0).unwrap() - 4.0).abs() < 1e-12);
        assert!((caught.sum_attacker(&table, 10.0).unwrap() + 40.0).abs() < 1e-12);
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut set = RecurringActionSet::new();
        set.add_defender("d1", "decoy");
        set.add_attacker("impact", false);
        set.clear();
        assert!(set.is_empty());
    }
}
