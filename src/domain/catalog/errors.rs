//! Catalog-specific error types.

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, GroupId, TemplateId};

/// Errors raised by catalog definitions and their weight validators.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A category contains a question below the minimum weight.
    MinWeightViolation { category_id: CategoryId },
    /// Some requested template ids do not resolve to existing templates.
    TemplatesNotFound { missing: Vec<TemplateId> },
    /// Templates were attached without a weight distribution.
    WeightsRequired,
    /// The weight map lacks entries for these templates.
    MissingWeights { ids: Vec<TemplateId> },
    /// The weight map carries entries for templates outside the group.
    ExtraWeights { ids: Vec<TemplateId> },
    /// Weights fall outside [0,1] or do not sum to 1.0.
    WeightsNotNormalized { sum: f64 },
    /// Template was not found.
    TemplateNotFound(TemplateId),
    /// Group was not found.
    GroupNotFound(GroupId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CatalogError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::MinWeightViolation { .. } => ErrorCode::MinWeightViolation,
            CatalogError::TemplatesNotFound { .. } => ErrorCode::TemplatesNotFound,
            CatalogError::WeightsRequired => ErrorCode::WeightsRequired,
            CatalogError::MissingWeights { .. } => ErrorCode::MissingWeights,
            CatalogError::ExtraWeights { .. } => ErrorCode::ExtraWeights,
            CatalogError::WeightsNotNormalized { .. } => ErrorCode::WeightsNotNormalized,
            CatalogError::TemplateNotFound(_) => ErrorCode::TemplateNotFound,
            CatalogError::GroupNotFound(_) => ErrorCode::GroupNotFound,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::MinWeightViolation { category_id } => format!(
                "Category {} contains a question with weight below {}",
                category_id,
                super::MIN_QUESTION_WEIGHT
            ),
            CatalogError::TemplatesNotFound { missing } => {
                format!("Templates not found: {}", join_ids(missing))
            }
            CatalogError::WeightsRequired => {
                "Template weights are required when templates are attached".to_string()
            }
            CatalogError::MissingWeights { ids } => {
                format!("Missing weights for templates: {}", join_ids(ids))
            }
            CatalogError::ExtraWeights { ids } => {
                format!("Weights given for templates outside the group: {}", join_ids(ids))
            }
            CatalogError::WeightsNotNormalized { sum } => {
                format!("Template weights must sum to 1.0, got {}", sum)
            }
            CatalogError::TemplateNotFound(id) => format!("Template not found: {}", id),
            CatalogError::GroupNotFound(id) => format!("Group not found: {}", id),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

fn join_ids(ids: &[TemplateId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CatalogError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_weight_violation_names_the_category() {
        let category_id = CategoryId::new();
        let err = CatalogError::MinWeightViolation { category_id };
        assert!(err.message().contains(&category_id.to_string()));
        assert_eq!(err.code(), ErrorCode::MinWeightViolation);
    }

    #[test]
    fn templates_not_found_lists_missing_ids() {
        let missing = vec![TemplateId::new(), TemplateId::new()];
        let err = CatalogError::TemplatesNotFound {
            missing: missing.clone(),
        };
        for id in &missing {
            assert!(err.message().contains(&id.to_string()));
        }
    }

    #[test]
    fn weights_not_normalized_reports_sum() {
        let err = CatalogError::WeightsNotNormalized { sum: 1.1 };
        assert!(err.message().contains("1.1"));
        assert_eq!(err.code(), ErrorCode::WeightsNotNormalized);
    }
}
