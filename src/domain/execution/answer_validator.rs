//! Answer validator - per-execution consistency checks.
//!
//! Pure check with no side effects; any violation aborts the execution
//! before a single score is computed or row persisted.

use std::collections::HashMap;

use crate::domain::catalog::Question;
use crate::domain::foundation::ApprovalStatus;

use super::{ExecutionError, SubmittedAnswer};

/// Maximum drift allowed between a submitted intermediate value and the
/// question's configured one.
pub const INTERMEDIATE_VALUE_TOLERANCE: f64 = 0.01;

/// Validate submitted answers against the resolved question set.
///
/// Two passes:
///
/// 1. **Completeness** — every required question must have a matching
///    answer; missing ones are reported together, by title, so the caller
///    can correct the submission.
/// 2. **Per-answer consistency** — unknown question references are hard
///    errors; values must lie in [0,1]; the approval status must agree
///    with the value (Approved ⇔ 1.0, NotApproved ⇔ 0.0, Intermediate
///    within tolerance of the configured value, and only where allowed).
pub fn validate_answers(
    questions: &[Question],
    answers: &[SubmittedAnswer],
) -> Result<(), ExecutionError> {
    let by_id: HashMap<_, _> = questions.iter().map(|q| (*q.id(), q)).collect();

    let missing_titles: Vec<String> = questions
        .iter()
        .filter(|q| q.required())
        .filter(|q| !answers.iter().any(|a| a.question_id == *q.id()))
        .map(|q| q.title().to_string())
        .collect();
    if !missing_titles.is_empty() {
        return Err(ExecutionError::MissingRequiredAnswers {
            question_titles: missing_titles,
        });
    }

    for answer in answers {
        let question = by_id
            .get(&answer.question_id)
            .ok_or(ExecutionError::UnknownQuestion(answer.question_id))?;

        let value = answer.approval_value;
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ExecutionError::ValueOutOfRange {
                question_id: answer.question_id,
                value,
            });
        }

        match answer.approval_status {
            ApprovalStatus::Intermediate => {
                if !question.has_intermediate_approval() {
                    return Err(ExecutionError::IntermediateNotAllowed(answer.question_id));
                }
                let expected = question.intermediate_value().value();
                if (value - expected).abs() > INTERMEDIATE_VALUE_TOLERANCE {
                    return Err(ExecutionError::IntermediateValueMismatch {
                        question_id: answer.question_id,
                        expected,
                        actual: value,
                    });
                }
            }
            ApprovalStatus::Approved => {
                if value != 1.0 {
                    return Err(ExecutionError::ApprovedValueMismatch {
                        question_id: answer.question_id,
                        value,
                    });
                }
            }
            ApprovalStatus::NotApproved => {
                if value != 0.0 {
                    return Err(ExecutionError::NotApprovedValueMismatch {
                        question_id: answer.question_id,
                        value,
                    });
                }
            }
        }
    }

    Ok(())
}
