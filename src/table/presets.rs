//! Attacker reward tables shipped with the built-in red strategies.
//!
//! Both the depth-first impact strategy and the server-downtime strategy
//! price the kill chain identically; only `impact` carries a recurring
//! coefficient, so it is the action that feeds the attacker recurring sum.

use super::{Coefficients, RewardTable, Side};

const KILL_CHAIN: [(&str, f64, f64); 6] = [
    ("pingsweep", -1.0, 0.0),
    ("portscan", -1.0, 0.0),
    ("discovery", -2.0, 0.0),
    ("lateral-movement", -4.0, 0.0),
    ("privilege-escalation", -6.0, 0.0),
    ("impact", -8.0, -4.0),
];

/// Attacker table for impact-seeking campaigns.
pub fn impact_campaign() -> RewardTable {
    RewardTable::from_map(
        Side::Attacker,
        KILL_CHAIN
            .iter()
            .map(|&(name, imm, rec)| (name.to_string(), Coefficients::new(imm, rec)))
            .collect(),
    )
}
