//! Recurring-effect bookkeeping.
//!
//! Defender effects (deployed decoys and the like) are keyed by an owner id
//! and stay active until removed by that id. Attacker effects are flagged as
//! neutralized or live at creation and are only dropped on episode reset.

pub mod book;
pub mod set;

pub use book::{is_impact_action, AttackerPredicate, RecurringBook, RecurringChange};
pub use set::{AttackerRecurringEntry, RecurringActionSet, RecurringEntry};
