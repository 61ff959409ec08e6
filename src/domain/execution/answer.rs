//! Answer entity - one recorded judgement for one question.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnswerId, ApprovalStatus, ApprovalValue, DomainError, ExecutionId, QuestionId, Timestamp,
};

/// An answer as submitted by the caller, before validation.
///
/// Carries the raw approval value; range and consistency checks happen in
/// the answer validator before any `Answer` record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub approval_status: ApprovalStatus,
    pub approval_value: f64,
    #[serde(default)]
    pub is_skipped: bool,
}

/// One recorded judgement for one (execution, question) pair.
///
/// `answer_score` and `max_score` are filled in by the score calculator,
/// never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    id: AnswerId,
    execution_id: ExecutionId,
    question_id: QuestionId,
    approval_status: ApprovalStatus,
    approval_value: ApprovalValue,
    answer_score: Option<f64>,
    max_score: Option<f64>,
    is_skipped: bool,
    answered_at: Timestamp,
}

impl Answer {
    /// Record a validated submission as an answer.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the approval value is outside [0,1]; the answer
    ///   validator rejects such submissions before this point
    pub fn record(
        id: AnswerId,
        execution_id: ExecutionId,
        submitted: &SubmittedAnswer,
        answered_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let approval_value = ApprovalValue::try_new(submitted.approval_value)?;
        Ok(Self {
            id,
            execution_id,
            question_id: submitted.question_id,
            approval_status: submitted.approval_status,
            approval_value,
            answer_score: None,
            max_score: None,
            is_skipped: submitted.is_skipped,
            answered_at,
        })
    }

    /// Reconstitute an answer from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AnswerId,
        execution_id: ExecutionId,
        question_id: QuestionId,
        approval_status: ApprovalStatus,
        approval_value: ApprovalValue,
        answer_score: Option<f64>,
        max_score: Option<f64>,
        is_skipped: bool,
        answered_at: Timestamp,
    ) -> Self {
        Self {
            id,
            execution_id,
            question_id,
            approval_status,
            approval_value,
            answer_score,
            max_score,
            is_skipped,
            answered_at,
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status
    }

    pub fn approval_value(&self) -> ApprovalValue {
        self.approval_value
    }

    pub fn answer_score(&self) -> Option<f64> {
        self.answer_score
    }

    pub fn max_score(&self) -> Option<f64> {
        self.max_score
    }

    pub fn is_skipped(&self) -> bool {
        self.is_skipped
    }

    pub fn answered_at(&self) -> &Timestamp {
        &self.answered_at
    }

    /// Attach the computed score. Called by the score calculator only.
    pub fn set_score(&mut self, answer_score: f64, max_score: f64) {
        self.answer_score = Some(answer_score);
        self.max_score = Some(max_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(value: f64) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id: QuestionId::new(),
            approval_status: ApprovalStatus::Approved,
            approval_value: value,
            is_skipped: false,
        }
    }

    #[test]
    fn record_creates_unscored_answer() {
        let a = Answer::record(
            AnswerId::new(),
            ExecutionId::new(),
            &submitted(1.0),
            Timestamp::now(),
        )
        .unwrap();
        assert!(a.answer_score().is_none());
        assert!(a.max_score().is_none());
        assert_eq!(a.approval_value().value(), 1.0);
    }

    #[test]
    fn record_rejects_out_of_range_value() {
        let result = Answer::record(
            AnswerId::new(),
            ExecutionId::new(),
            &submitted(1.2),
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn set_score_fills_both_fields() {
        let mut a = Answer::record(
            AnswerId::new(),
            ExecutionId::new(),
            &submitted(0.0),
            Timestamp::now(),
        )
        .unwrap();
        a.set_score(0.0, 0.6);
        assert_eq!(a.answer_score(), Some(0.0));
        assert_eq!(a.max_score(), Some(0.6));
    }

    #[test]
    fn submitted_answer_defaults_is_skipped_to_false() {
        let json = format!(
            r#"{{"question_id":"{}","approval_status":"approved","approval_value":1.0}}"#,
            QuestionId::new()
        );
        let s: SubmittedAnswer = serde_json::from_str(&json).unwrap();
        assert!(!s.is_skipped);
    }
}
