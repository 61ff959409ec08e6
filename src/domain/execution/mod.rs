//! Execution module - one concrete run of a template or group.
//!
//! Holds the Execution aggregate, the Answer entity, the answer validator,
//! and the score calculator. An execution is created `InProgress`, mutated
//! only by the orchestrator during scoring, and never re-scored once it
//! reaches a terminal state.

mod aggregate;
mod answer;
mod answer_validator;
mod errors;
mod scoring;
mod target;

pub use aggregate::Execution;
pub use answer::{Answer, SubmittedAnswer};
pub use answer_validator::validate_answers;
pub use errors::ExecutionError;
pub use scoring::{score_group, score_template, GroupScoreSummary, ScoreSummary};
pub use target::ExecutionTarget;
