//! Template aggregate - a reusable checklist definition.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChecklistType, DomainError, TemplateId};

use super::{validate_template_weights, CatalogError, Category, Question};

/// Threshold applied when a template or group does not configure one.
pub const DEFAULT_PERFORMANCE_THRESHOLD: f64 = 70.0;

/// A reusable checklist definition for a single target type.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `performance_threshold` lies in [0,100]
/// - every question under every category carries weight >= 0.1, checked
///   whenever categories change — no partial acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    id: TemplateId,
    title: String,
    checklist_type: ChecklistType,

    /// Score percentage below which an incident is considered.
    performance_threshold: f64,

    is_active: bool,
    categories: Vec<Category>,
}

impl Template {
    /// Create a new active template with the default threshold and no
    /// categories.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty
    pub fn new(
        id: TemplateId,
        title: impl Into<String>,
        checklist_type: ChecklistType,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Template title cannot be empty"));
        }
        Ok(Self {
            id,
            title,
            checklist_type,
            performance_threshold: DEFAULT_PERFORMANCE_THRESHOLD,
            is_active: true,
            categories: Vec::new(),
        })
    }

    /// Set a custom performance threshold.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the threshold is outside [0,100]
    pub fn with_performance_threshold(mut self, threshold: f64) -> Result<Self, DomainError> {
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(DomainError::validation(
                "performance_threshold",
                "Performance threshold must be between 0 and 100",
            ));
        }
        self.performance_threshold = threshold;
        Ok(self)
    }

    /// Replace the template's categories, enforcing the weight invariant.
    ///
    /// Runs synchronously before the change is accepted; a single violating
    /// question rejects the whole set.
    ///
    /// # Errors
    ///
    /// - `MinWeightViolation` naming the offending category
    pub fn with_categories(mut self, categories: Vec<Category>) -> Result<Self, CatalogError> {
        self.categories = categories;
        validate_template_weights(&self)?;
        Ok(self)
    }

    /// Reconstitute a template from persistence (no validation).
    pub fn reconstitute(
        id: TemplateId,
        title: String,
        checklist_type: ChecklistType,
        performance_threshold: f64,
        is_active: bool,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            id,
            title,
            checklist_type,
            performance_threshold,
            is_active,
            categories,
        }
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn checklist_type(&self) -> ChecklistType {
        self.checklist_type
    }

    pub fn performance_threshold(&self) -> f64 {
        self.performance_threshold
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All active questions across all categories, category-joined.
    pub fn active_questions(&self) -> Vec<&Question> {
        self.categories
            .iter()
            .flat_map(|c| c.active_questions())
            .collect()
    }
}
