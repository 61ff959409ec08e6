//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidTarget,

    // Catalog weight errors
    MinWeightViolation,
    TemplatesNotFound,
    WeightsRequired,
    MissingWeights,
    ExtraWeights,
    WeightsNotNormalized,

    // Answer errors
    MissingRequiredAnswers,
    UnknownQuestion,
    IntermediateNotAllowed,
    IntermediateValueMismatch,
    ApprovedValueMismatch,
    NotApprovedValueMismatch,

    // Not found errors
    TemplateNotFound,
    GroupNotFound,
    ExecutionNotFound,

    // State errors
    InvalidStateTransition,
    ExecutionAlreadyCompleted,
    IncidentAlreadyExists,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidTarget => "INVALID_TARGET",
            ErrorCode::MinWeightViolation => "MIN_WEIGHT_VIOLATION",
            ErrorCode::TemplatesNotFound => "TEMPLATES_NOT_FOUND",
            ErrorCode::WeightsRequired => "WEIGHTS_REQUIRED",
            ErrorCode::MissingWeights => "MISSING_WEIGHTS",
            ErrorCode::ExtraWeights => "EXTRA_WEIGHTS",
            ErrorCode::WeightsNotNormalized => "WEIGHTS_NOT_NORMALIZED",
            ErrorCode::MissingRequiredAnswers => "MISSING_REQUIRED_ANSWERS",
            ErrorCode::UnknownQuestion => "UNKNOWN_QUESTION",
            ErrorCode::IntermediateNotAllowed => "INTERMEDIATE_NOT_ALLOWED",
            ErrorCode::IntermediateValueMismatch => "INTERMEDIATE_VALUE_MISMATCH",
            ErrorCode::ApprovedValueMismatch => "APPROVED_VALUE_MISMATCH",
            ErrorCode::NotApprovedValueMismatch => "NOT_APPROVED_VALUE_MISMATCH",
            ErrorCode::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            ErrorCode::GroupNotFound => "GROUP_NOT_FOUND",
            ErrorCode::ExecutionNotFound => "EXECUTION_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ExecutionAlreadyCompleted => "EXECUTION_ALREADY_COMPLETED",
            ErrorCode::IncidentAlreadyExists => "INCIDENT_ALREADY_EXISTS",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl ErrorCode {
    /// Returns true for codes caused by malformed or inconsistent input.
    ///
    /// Validation failures are surfaced to the caller unmodified, never
    /// retried, never silently corrected.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            ErrorCode::TemplateNotFound
                | ErrorCode::GroupNotFound
                | ErrorCode::ExecutionNotFound
                | ErrorCode::DatabaseError
                | ErrorCode::InternalError
        )
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("executor_user_id");
        assert_eq!(format!("{}", err), "Field 'executor_user_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("approval_value", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'approval_value' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ExecutionNotFound, "Execution not found");
        assert_eq!(format!("{}", err), "[EXECUTION_NOT_FOUND] Execution not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::MinWeightViolation, "Weight below minimum")
            .with_detail("category_id", "cat-1")
            .with_detail("weight", "0.05");

        assert_eq!(err.details.get("category_id"), Some(&"cat-1".to_string()));
        assert_eq!(err.details.get("weight"), Some(&"0.05".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::WeightsNotNormalized),
            "WEIGHTS_NOT_NORMALIZED"
        );
        assert_eq!(
            format!("{}", ErrorCode::MissingRequiredAnswers),
            "MISSING_REQUIRED_ANSWERS"
        );
    }

    #[test]
    fn validation_codes_are_classified_as_validation() {
        assert!(ErrorCode::MinWeightViolation.is_validation());
        assert!(ErrorCode::UnknownQuestion.is_validation());
        assert!(!ErrorCode::TemplateNotFound.is_validation());
        assert!(!ErrorCode::DatabaseError.is_validation());
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("target_type").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }
}
