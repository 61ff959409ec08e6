//! Catalog store port (read side).
//!
//! Supplies template and group definitions: categories, questions,
//! weights, thresholds. The execution engine only ever reads from the
//! catalog; definition editing happens elsewhere.

use crate::domain::catalog::{Group, Question, Template};
use crate::domain::foundation::{DomainError, GroupId, TemplateId};
use async_trait::async_trait;

/// Read port for checklist definitions.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load a template with its categories and questions.
    ///
    /// Returns `None` if not found.
    async fn get_template(&self, id: &TemplateId) -> Result<Option<Template>, DomainError>;

    /// Load a group with its template ids and weight distribution.
    ///
    /// Returns `None` if not found.
    async fn get_group(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    /// Active questions for one template, category-joined.
    async fn get_template_questions(
        &self,
        id: &TemplateId,
    ) -> Result<Vec<Question>, DomainError>;

    /// The subset of the given ids that resolve to existing templates.
    ///
    /// Used by the group weight validator to report missing members.
    async fn templates_exist(
        &self,
        ids: &[TemplateId],
    ) -> Result<Vec<TemplateId>, DomainError>;
}
