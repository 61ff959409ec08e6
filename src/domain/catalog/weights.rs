//! Weight validators for templates and groups.
//!
//! Both validators are pure functions returning the first violation found.
//! They run synchronously before any definition change is accepted and are
//! re-run by the execution orchestrator on loaded catalog data.

use std::collections::BTreeMap;

use crate::domain::foundation::TemplateId;

use super::{CatalogError, Template};

/// Minimum weight any question may carry. The floor itself is valid.
pub const MIN_QUESTION_WEIGHT: f64 = 0.1;

/// Absolute tolerance for the group weight sum.
pub const GROUP_WEIGHT_TOLERANCE: f64 = 0.0001;

/// Enforce the minimum-weight invariant on a template's questions.
///
/// Every question under every category must carry weight >= 0.1 (the floor
/// itself is valid). Categories with zero questions are valid. Inactive
/// questions are still checked: a definition is either wholly valid or
/// rejected.
///
/// # Errors
///
/// - `MinWeightViolation` naming the first offending category
pub fn validate_template_weights(template: &Template) -> Result<(), CatalogError> {
    for category in template.categories() {
        for question in category.questions() {
            if question.weight() < MIN_QUESTION_WEIGHT {
                return Err(CatalogError::MinWeightViolation {
                    category_id: *category.id(),
                });
            }
        }
    }
    Ok(())
}

/// Enforce the group weight distribution invariant.
///
/// Checks run in order; the first failure wins:
///
/// 1. An empty `requested` list skips all checks.
/// 2. Every requested id must appear in `found` (the subset the catalog
///    resolved).
/// 3. A weight map must be present.
/// 4. Weight keys must equal the requested ids as a set, exactly.
/// 5. Each weight lies in [0,1] and the sum equals 1.0 within tolerance.
pub fn validate_group_weights(
    requested: &[TemplateId],
    found: &[TemplateId],
    weights: Option<&BTreeMap<TemplateId, f64>>,
) -> Result<(), CatalogError> {
    if requested.is_empty() {
        return Ok(());
    }

    let missing: Vec<TemplateId> = requested
        .iter()
        .filter(|id| !found.contains(id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::TemplatesNotFound { missing });
    }

    let weights = weights.ok_or(CatalogError::WeightsRequired)?;

    let absent: Vec<TemplateId> = requested
        .iter()
        .filter(|id| !weights.contains_key(id))
        .copied()
        .collect();
    if !absent.is_empty() {
        return Err(CatalogError::MissingWeights { ids: absent });
    }

    let extra: Vec<TemplateId> = weights
        .keys()
        .filter(|id| !requested.contains(id))
        .copied()
        .collect();
    if !extra.is_empty() {
        return Err(CatalogError::ExtraWeights { ids: extra });
    }

    let mut sum = 0.0;
    for weight in weights.values() {
        if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
            return Err(CatalogError::WeightsNotNormalized { sum: *weight });
        }
        sum += weight;
    }
    if (sum - 1.0).abs() > GROUP_WEIGHT_TOLERANCE {
        return Err(CatalogError::WeightsNotNormalized { sum });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Category, Question, Template};
    use crate::domain::foundation::{CategoryId, ChecklistType, QuestionId};

    fn template_with_question_weights(weights: &[f64]) -> Template {
        let category_id = CategoryId::new();
        let questions = weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                Question::new(QuestionId::new(), category_id, format!("Q{}", i), *w, false).unwrap()
            })
            .collect();
        let category = Category::new(category_id, "General", 0)
            .unwrap()
            .with_questions(questions);
        Template::reconstitute(
            crate::domain::foundation::TemplateId::new(),
            "T".to_string(),
            ChecklistType::Inspection,
            70.0,
            true,
            vec![category],
        )
    }

    fn ids(n: usize) -> Vec<TemplateId> {
        (0..n).map(|_| TemplateId::new()).collect()
    }

    fn weight_map(pairs: &[(TemplateId, f64)]) -> BTreeMap<TemplateId, f64> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn template_floor_weight_is_valid() {
        let t = template_with_question_weights(&[0.1, 0.1]);
        assert!(validate_template_weights(&t).is_ok());
    }

    #[test]
    fn template_weight_just_below_floor_is_rejected() {
        let t = template_with_question_weights(&[0.6, 0.09999]);
        let err = validate_template_weights(&t).unwrap_err();
        assert!(matches!(err, CatalogError::MinWeightViolation { .. }));
    }

    #[test]
    fn template_with_no_questions_is_valid() {
        let t = template_with_question_weights(&[]);
        assert!(validate_template_weights(&t).is_ok());
    }

    #[test]
    fn empty_template_list_skips_all_group_checks() {
        assert!(validate_group_weights(&[], &[], None).is_ok());
    }

    #[test]
    fn unresolved_templates_fail_first() {
        let requested = ids(2);
        // Weights are also absent, but the not-found check wins.
        let err = validate_group_weights(&requested, &requested[..1], None).unwrap_err();
        match err {
            CatalogError::TemplatesNotFound { missing } => {
                assert_eq!(missing, vec![requested[1]]);
            }
            other => panic!("expected TemplatesNotFound, got {:?}", other),
        }
    }

    #[test]
    fn missing_weight_map_is_rejected() {
        let requested = ids(1);
        let err = validate_group_weights(&requested, &requested, None).unwrap_err();
        assert_eq!(err, CatalogError::WeightsRequired);
    }

    #[test]
    fn missing_weight_keys_are_reported() {
        let requested = ids(2);
        let weights = weight_map(&[(requested[0], 1.0)]);
        let err = validate_group_weights(&requested, &requested, Some(&weights)).unwrap_err();
        match err {
            CatalogError::MissingWeights { ids } => assert_eq!(ids, vec![requested[1]]),
            other => panic!("expected MissingWeights, got {:?}", other),
        }
    }

    #[test]
    fn extra_weight_keys_are_reported() {
        let requested = ids(1);
        let stranger = TemplateId::new();
        let weights = weight_map(&[(requested[0], 1.0), (stranger, 0.0)]);
        let err = validate_group_weights(&requested, &requested, Some(&weights)).unwrap_err();
        match err {
            CatalogError::ExtraWeights { ids } => assert_eq!(ids, vec![stranger]),
            other => panic!("expected ExtraWeights, got {:?}", other),
        }
    }

    #[test]
    fn sum_above_one_is_rejected() {
        let requested = ids(2);
        let weights = weight_map(&[(requested[0], 0.5), (requested[1], 0.6)]);
        let err = validate_group_weights(&requested, &requested, Some(&weights)).unwrap_err();
        assert!(matches!(err, CatalogError::WeightsNotNormalized { .. }));
    }

    #[test]
    fn sum_within_tolerance_is_accepted() {
        let requested = ids(3);
        let weights = weight_map(&[
            (requested[0], 0.33333),
            (requested[1], 0.33333),
            (requested[2], 0.33334),
        ]);
        assert!(validate_group_weights(&requested, &requested, Some(&weights)).is_ok());
    }

    #[test]
    fn individual_weight_outside_unit_interval_is_rejected() {
        let requested = ids(2);
        let weights = weight_map(&[(requested[0], 1.5), (requested[1], -0.5)]);
        let err = validate_group_weights(&requested, &requested, Some(&weights)).unwrap_err();
        assert!(matches!(err, CatalogError::WeightsNotNormalized { .. }));
    }

    #[test]
    fn single_template_with_full_weight_is_valid() {
        let requested = ids(1);
        let weights = weight_map(&[(requested[0], 1.0)]);
        assert!(validate_group_weights(&requested, &requested, Some(&weights)).is_ok());
    }
}
