//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Fleetcheck domain.

mod approval;
mod checklist_type;
mod errors;
mod execution_status;
mod ids;
mod severity;
mod state_machine;
mod timestamp;

pub use approval::{ApprovalStatus, ApprovalValue};
pub use checklist_type::ChecklistType;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use execution_status::ExecutionStatus;
pub use ids::{
    AnswerId, CategoryId, ExecutionId, GroupId, IncidentId, QuestionId, TargetType, TemplateId,
    UserId,
};
pub use severity::{IncidentSeverity, IncidentStatus};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
