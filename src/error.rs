use thiserror::Error;

use crate::table::Side;

/// Errors raised while registering outcomes or computing rewards.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RewardError {
    #[error("Invalid action `{action}`: not present in the {side} reward table")]
    UnknownAction { side: Side, action: String },

    #[error("Invalid recurring change code {0}: must be -1, 0 or 1")]
    InvalidChangeKind(i64),

    #[error("Invalid recurring range [{low}, {high}]: low bound exceeds high bound")]
    InvalidRange { low: usize, high: usize },

    #[error("Invalid scaling factor: {0}")]
    InvalidScaling(f64),

    #[error("Duplicate action in reward table: {0}")]
    DuplicateAction(String),

    #[error("Unknown reward kind: {0}")]
    UnknownRewardKind(String),
}

impl RewardError {
    pub(crate) fn unknown_action(side: Side, action: &str) -> Self {
        RewardError::UnknownAction {
            side,
            action: action.to_string(),
        }
    }
}
