//! Execution-specific error types.

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{DomainError, ErrorCode, ExecutionId, GroupId, QuestionId, TemplateId};

/// Errors raised while validating and scoring a checklist execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// Neither or both of template/group were given.
    InvalidTarget(String),
    /// Template was not found.
    TemplateNotFound(TemplateId),
    /// Group was not found.
    GroupNotFound(GroupId),
    /// Execution was not found.
    NotFound(ExecutionId),
    /// Required questions left unanswered, named by title.
    MissingRequiredAnswers { question_titles: Vec<String> },
    /// Answer references a question outside the resolved question set.
    UnknownQuestion(QuestionId),
    /// Approval value outside [0,1].
    ValueOutOfRange { question_id: QuestionId, value: f64 },
    /// Intermediate answer for a question without intermediate approval.
    IntermediateNotAllowed(QuestionId),
    /// Intermediate answer too far from the configured value.
    IntermediateValueMismatch {
        question_id: QuestionId,
        expected: f64,
        actual: f64,
    },
    /// Approved answers must carry value 1.0 exactly.
    ApprovedValueMismatch { question_id: QuestionId, value: f64 },
    /// Not-approved answers must carry value 0.0 exactly.
    NotApprovedValueMismatch { question_id: QuestionId, value: f64 },
    /// A catalog invariant failed on loaded definitions.
    Catalog(CatalogError),
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ExecutionError {
    pub fn invalid_target(message: impl Into<String>) -> Self {
        ExecutionError::InvalidTarget(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ExecutionError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ExecutionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ExecutionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ExecutionError::InvalidTarget(_) => ErrorCode::InvalidTarget,
            ExecutionError::TemplateNotFound(_) => ErrorCode::TemplateNotFound,
            ExecutionError::GroupNotFound(_) => ErrorCode::GroupNotFound,
            ExecutionError::NotFound(_) => ErrorCode::ExecutionNotFound,
            ExecutionError::MissingRequiredAnswers { .. } => ErrorCode::MissingRequiredAnswers,
            ExecutionError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            ExecutionError::ValueOutOfRange { .. } => ErrorCode::OutOfRange,
            ExecutionError::IntermediateNotAllowed(_) => ErrorCode::IntermediateNotAllowed,
            ExecutionError::IntermediateValueMismatch { .. } => {
                ErrorCode::IntermediateValueMismatch
            }
            ExecutionError::ApprovedValueMismatch { .. } => ErrorCode::ApprovedValueMismatch,
            ExecutionError::NotApprovedValueMismatch { .. } => {
                ErrorCode::NotApprovedValueMismatch
            }
            ExecutionError::Catalog(err) => err.code(),
            ExecutionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ExecutionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ExecutionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExecutionError::InvalidTarget(msg) => msg.clone(),
            ExecutionError::TemplateNotFound(id) => format!("Template not found: {}", id),
            ExecutionError::GroupNotFound(id) => format!("Group not found: {}", id),
            ExecutionError::NotFound(id) => format!("Execution not found: {}", id),
            ExecutionError::MissingRequiredAnswers { question_titles } => format!(
                "Required questions left unanswered: {}",
                question_titles.join(", ")
            ),
            ExecutionError::UnknownQuestion(id) => {
                format!("Answer references unknown question: {}", id)
            }
            ExecutionError::ValueOutOfRange { question_id, value } => format!(
                "Approval value {} for question {} is outside [0,1]",
                value, question_id
            ),
            ExecutionError::IntermediateNotAllowed(id) => format!(
                "Question {} does not allow intermediate approval",
                id
            ),
            ExecutionError::IntermediateValueMismatch {
                question_id,
                expected,
                actual,
            } => format!(
                "Intermediate value {} for question {} does not match configured value {}",
                actual, question_id, expected
            ),
            ExecutionError::ApprovedValueMismatch { question_id, value } => format!(
                "Approved answer for question {} must carry value 1.0, got {}",
                question_id, value
            ),
            ExecutionError::NotApprovedValueMismatch { question_id, value } => format!(
                "Not-approved answer for question {} must carry value 0.0, got {}",
                question_id, value
            ),
            ExecutionError::Catalog(err) => err.message(),
            ExecutionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ExecutionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ExecutionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ExecutionError {}

impl From<CatalogError> for ExecutionError {
    fn from(err: CatalogError) -> Self {
        ExecutionError::Catalog(err)
    }
}

impl From<DomainError> for ExecutionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => ExecutionError::InvalidState(err.to_string()),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ExecutionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ExecutionError::Infrastructure(err.to_string()),
        }
    }
}
