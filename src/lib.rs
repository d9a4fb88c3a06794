//! adversary_reward - reward shaping for attacker/defender training episodes
//!
//! Converts the outcome of one attacker action and one defender action per
//! simulated step into a scalar training signal, while tracking effects that
//! keep paying (or costing) on every later step until they are removed.

pub mod config;
pub mod error;
pub mod policy;
pub mod recurring;
pub mod scaling;
pub mod table;

pub use config::RewardConfig;
pub use error::RewardError;
pub use policy::{AnyRewardPolicy, RewardKind, RewardPolicy, StepOutcome};
pub use recurring::{RecurringActionSet, RecurringChange};
pub use table::{Coefficients, RewardTable, Side};

/// Handle identifying one recurring defender effect.
pub type OwnerId = String;

/// Generates a new owner id (UUID v4, simple hex form).
pub fn generate_owner_id() -> OwnerId {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_ids_are_unique_hex() {
        let a = generate_owner_id();
        let b = generate_owner_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
