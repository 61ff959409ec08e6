//! Group aggregate - a weighted bundle of templates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, GroupId, TemplateId};

use super::{validate_group_weights, CatalogError, DEFAULT_PERFORMANCE_THRESHOLD};

/// A weighted bundle of templates evaluated together as one compliance
/// unit.
///
/// # Invariants
///
/// - `template_weights` keys equal `template_ids` exactly whenever
///   templates are attached
/// - weights lie in [0,1] and sum to 1.0 within tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    title: String,
    performance_threshold: f64,
    template_ids: Vec<TemplateId>,
    template_weights: BTreeMap<TemplateId, f64>,
}

impl Group {
    /// Create a new empty group with the default threshold.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty
    pub fn new(id: GroupId, title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Group title cannot be empty"));
        }
        Ok(Self {
            id,
            title,
            performance_threshold: DEFAULT_PERFORMANCE_THRESHOLD,
            template_ids: Vec::new(),
            template_weights: BTreeMap::new(),
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

    /// Attach templates with their weight distribution.
    ///
    /// `found` is the subset of `template_ids` that resolved against the
    /// catalog; the caller looks them up before attaching.
    ///
    /// # Errors
    ///
    /// Any group weight validation failure, first violation wins
    /// (see [`validate_group_weights`]).
    pub fn assign_templates(
        &mut self,
        template_ids: Vec<TemplateId>,
        found: &[TemplateId],
        weights: Option<BTreeMap<TemplateId, f64>>,
    ) -> Result<(), CatalogError> {
        validate_group_weights(&template_ids, found, weights.as_ref())?;
        self.template_weights = weights.unwrap_or_default();
        self.template_ids = template_ids;
        Ok(())
    }

    /// Reconstitute a group from persistence (no validation).
    pub fn reconstitute(
        id: GroupId,
        title: String,
        performance_threshold: f64,
        template_ids: Vec<TemplateId>,
        template_weights: BTreeMap<TemplateId, f64>,
    ) -> Self {
        Self {
            id,
            title,
            performance_threshold,
            template_ids,
            template_weights,
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn performance_threshold(&self) -> f64 {
        self.performance_threshold
    }

    pub fn template_ids(&self) -> &[TemplateId] {
        &self.template_ids
    }

    pub fn template_weights(&self) -> &BTreeMap<TemplateId, f64> {
        &self.template_weights
    }

    /// Weight assigned to one member template.
    pub fn weight_for(&self, template_id: &TemplateId) -> Option<f64> {
        self.template_weights.get(template_id).copied()
    }
}
