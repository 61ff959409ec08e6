//! Question entity - one weighted item on a checklist.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApprovalValue, CategoryId, DomainError, QuestionId};

/// Maximum length for question titles.
pub const MAX_QUESTION_TITLE_LENGTH: usize = 1000;

/// A single checklist question.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `weight` is a free (non-normalized) multiplier; the >= 0.1 floor is
///   enforced at the template level whenever categories change
/// - `intermediate_value` is only meaningful when
///   `has_intermediate_approval` is true
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,

    /// Category this question belongs to.
    category_id: CategoryId,

    title: String,

    /// Free scoring multiplier.
    weight: f64,

    /// Required questions must be answered on every execution.
    required: bool,

    /// Whether a partial (intermediate) approval is allowed.
    has_intermediate_approval: bool,

    /// The expected approval value for intermediate answers.
    intermediate_value: ApprovalValue,

    /// Inactive questions are skipped by the score calculator.
    is_active: bool,
}

impl Question {
    /// Create a new active question without intermediate approval.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty or too long, or weight is not
    ///   finite or negative
    pub fn new(
        id: QuestionId,
        category_id: CategoryId,
        title: impl Into<String>,
        weight: f64,
        required: bool,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        Self::validate_title(&title)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(DomainError::validation(
                "weight",
                "Question weight must be a finite non-negative number",
            ));
        }

        Ok(Self {
            id,
            category_id,
            title,
            weight,
            required,
            has_intermediate_approval: false,
            intermediate_value: ApprovalValue::NOT_APPROVED,
            is_active: true,
        })
    }

    /// Enable intermediate approval with the given expected value.
    pub fn with_intermediate_approval(mut self, intermediate_value: ApprovalValue) -> Self {
        self.has_intermediate_approval = true;
        self.intermediate_value = intermediate_value;
        self
    }

    /// Reconstitute a question from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: QuestionId,
        category_id: CategoryId,
        title: String,
        weight: f64,
        required: bool,
        has_intermediate_approval: bool,
        intermediate_value: ApprovalValue,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            category_id,
            title,
            weight,
            required,
            has_intermediate_approval,
            intermediate_value,
            is_active,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn has_intermediate_approval(&self) -> bool {
        self.has_intermediate_approval
    }

    pub fn intermediate_value(&self) -> ApprovalValue {
        self.intermediate_value
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Question title cannot be empty"));
        }
        if title.len() > MAX_QUESTION_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Question title exceeds {} characters", MAX_QUESTION_TITLE_LENGTH),
            ));
        }
        Ok(())
    }
}
