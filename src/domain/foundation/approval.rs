//! Approval status and approval value for answered questions.
//!
//! The approval value is the [0,1] compliance fraction recorded for one
//! answered question; it doubles as that question's score.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// How the executor judged a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Approved,
    NotApproved,
    Intermediate,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::NotApproved => "NotApproved",
            ApprovalStatus::Intermediate => "Intermediate",
        };
        write!(f, "{}", s)
    }
}

/// Compliance fraction in [0,1] recorded for one answer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalValue(f64);

impl ApprovalValue {
    /// Full compliance.
    pub const APPROVED: Self = Self(1.0);

    /// No compliance.
    pub const NOT_APPROVED: Self = Self(0.0);

    /// Creates an ApprovalValue, returning error if outside [0,1] or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "approval_value",
                0.0,
                1.0,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for ApprovalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_bounds() {
        assert!(ApprovalValue::try_new(0.0).is_ok());
        assert!(ApprovalValue::try_new(0.5).is_ok());
        assert!(ApprovalValue::try_new(1.0).is_ok());
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(ApprovalValue::try_new(-0.01).is_err());
        assert!(ApprovalValue::try_new(1.01).is_err());
        assert!(ApprovalValue::try_new(f64::NAN).is_err());
    }

    #[test]
    fn constants_carry_expected_values() {
        assert_eq!(ApprovalValue::APPROVED.value(), 1.0);
        assert_eq!(ApprovalValue::NOT_APPROVED.value(), 0.0);
    }

    #[test]
    fn approval_status_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::NotApproved).unwrap(),
            "\"not_approved\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Intermediate).unwrap(),
            "\"intermediate\""
        );
    }

    #[test]
    fn approval_status_deserializes_from_snake_case() {
        let status: ApprovalStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, ApprovalStatus::Approved);
    }
}
