//! Condition evaluation.
//!
//! Conditions are resolved into [`ConditionSpec`] once when the configuration
//! is loaded. Evaluating them is pure: no I/O, no hidden state.

mod evaluate;
mod types;

pub use evaluate::{evaluate, evaluate_all, fail_all};
pub use types::{ConditionResult, ConditionSpec};
