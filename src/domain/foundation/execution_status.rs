//! ExecutionStatus enum for tracking checklist execution lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a checklist execution.
///
/// `Pending` is transient: it is set at creation and immediately advanced
/// by the orchestrator. `Completed` may only move to `LowPerformance`, and
/// only within the same scoring pass that completed the execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    LowPerformance,
}

impl ExecutionStatus {
    /// Returns true once the execution has been scored and sealed.
    ///
    /// Terminal here means "never re-scored", which includes `Completed`
    /// even though the state machine still allows the incident transition.
    pub fn is_sealed(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Completed | ExecutionStatus::LowPerformance
        )
    }
}

impl StateMachine for ExecutionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ExecutionStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (InProgress, Completed) | (Completed, LowPerformance)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ExecutionStatus::*;
        match self {
            Pending => vec![InProgress],
            InProgress => vec![Completed],
            Completed => vec![LowPerformance],
            LowPerformance => vec![],
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::Pending => "Pending",
            ExecutionStatus::InProgress => "InProgress",
            ExecutionStatus::Completed => "Completed",
            ExecutionStatus::LowPerformance => "LowPerformance",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(ExecutionStatus::default(), ExecutionStatus::Pending);
    }

    #[test]
    fn pending_advances_to_in_progress() {
        let next = ExecutionStatus::Pending
            .transition_to(ExecutionStatus::InProgress)
            .unwrap();
        assert_eq!(next, ExecutionStatus::InProgress);
    }

    #[test]
    fn in_progress_completes() {
        assert!(ExecutionStatus::InProgress.can_transition_to(&ExecutionStatus::Completed));
    }

    #[test]
    fn completed_may_only_move_to_low_performance() {
        assert_eq!(
            ExecutionStatus::Completed.valid_transitions(),
            vec![ExecutionStatus::LowPerformance]
        );
        assert!(ExecutionStatus::Completed
            .transition_to(ExecutionStatus::InProgress)
            .is_err());
    }

    #[test]
    fn low_performance_is_terminal() {
        assert!(ExecutionStatus::LowPerformance.is_terminal());
        assert!(ExecutionStatus::LowPerformance
            .transition_to(ExecutionStatus::Completed)
            .is_err());
    }

    #[test]
    fn pending_cannot_skip_to_completed() {
        assert!(ExecutionStatus::Pending
            .transition_to(ExecutionStatus::Completed)
            .is_err());
    }

    #[test]
    fn sealed_statuses_are_never_rescored() {
        assert!(!ExecutionStatus::Pending.is_sealed());
        assert!(!ExecutionStatus::InProgress.is_sealed());
        assert!(ExecutionStatus::Completed.is_sealed());
        assert!(ExecutionStatus::LowPerformance.is_sealed());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&ExecutionStatus::LowPerformance).unwrap(),
            "\"low_performance\""
        );
        assert_eq!(
            serde_json::to_string(&ExecutionStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: ExecutionStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, ExecutionStatus::Completed);
    }
}
