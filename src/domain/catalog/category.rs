//! Category entity - an ordered grouping of questions.
//!
//! Categories carry no weight of their own (flat weight system); only
//! questions do.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, DomainError};

use super::Question;

/// A titled, ordered grouping of questions within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    title: String,
    sort_order: i32,
    questions: Vec<Question>,
}

impl Category {
    /// Create a new empty category.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty
    pub fn new(id: CategoryId, title: impl Into<String>, sort_order: i32) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Category title cannot be empty"));
        }
        Ok(Self {
            id,
            title,
            sort_order,
            questions: Vec::new(),
        })
    }

    /// Replace the category's questions.
    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    /// Reconstitute a category from persistence (no validation).
    pub fn reconstitute(
        id: CategoryId,
        title: String,
        sort_order: i32,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title,
            sort_order,
            questions,
        }
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions that participate in scoring.
    pub fn active_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;

    #[test]
    fn new_creates_empty_category() {
        let c = Category::new(CategoryId::new(), "Brakes", 1).unwrap();
        assert_eq!(c.title(), "Brakes");
        assert_eq!(c.sort_order(), 1);
        assert!(c.questions().is_empty());
    }

    #[test]
    fn new_rejects_empty_title() {
        assert!(Category::new(CategoryId::new(), "", 0).is_err());
    }

    #[test]
    fn active_questions_filters_inactive() {
        let category_id = CategoryId::new();
        let active =
            Question::new(QuestionId::new(), category_id, "Pads within tolerance", 0.5, true)
                .unwrap();
        let inactive = Question::reconstitute(
            QuestionId::new(),
            category_id,
            "Retired check".to_string(),
            0.5,
            false,
            false,
            crate::domain::foundation::ApprovalValue::NOT_APPROVED,
            false,
        );
        let c = Category::new(category_id, "Brakes", 0)
            .unwrap()
            .with_questions(vec![active.clone(), inactive]);

        let visible: Vec<_> = c.active_questions().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id(), active.id());
    }
}
